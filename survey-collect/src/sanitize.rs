//! Option text sanitization.
//!
//! Declared option strings may carry markup for display. The selectable key
//! posted back by the client must be plain text, and attribute quoting on
//! the rendered page uses `"`, so double quotes in keys would break it.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Derive the selectable key for a declared option string.
///
/// Tags are stripped, `&amp;` is unescaped, double quotes become single
/// quotes, and the result is trimmed. The original markup is kept separately
/// for display.
pub fn option_key(option: &str) -> String {
    TAG.replace_all(option, "")
        .replace("&amp;", "&")
        .replace('"', "'")
        .trim()
        .to_string()
}

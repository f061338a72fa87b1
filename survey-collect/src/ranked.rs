//! The ranked choice compound input.
//!
//! Three position selectors share one option list; the collected preference
//! is stored as a single comma-joined string, not three separate answers.
//! Rendering the selectors as one grouped visual unit is a presentation
//! concern outside this crate.

/// Structural error for a malformed serialized ranked choice value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankedChoiceError {
    /// A non-empty serialized value must split into exactly three parts.
    /// Padding or truncating would silently reorder preferences, so
    /// malformed values are rejected outright.
    #[error("ranked choice value has {0} parts, expected 3")]
    WrongPartCount(usize),
}

/// The number of ranked positions.
pub const RANKED_POSITIONS: usize = 3;

/// Compose and decompose the comma-joined ranked choice representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedChoiceInput;

impl RankedChoiceInput {
    /// Split a serialized value into its three positions.
    ///
    /// An empty value decomposes to three empty positions.
    pub fn decompose(
        serialized: &str,
    ) -> Result<[Option<String>; RANKED_POSITIONS], RankedChoiceError> {
        if serialized.is_empty() {
            return Ok([None, None, None]);
        }
        let parts: Vec<&str> = serialized.split(',').collect();
        if parts.len() != RANKED_POSITIONS {
            return Err(RankedChoiceError::WrongPartCount(parts.len()));
        }
        Ok([
            position(parts[0]),
            position(parts[1]),
            position(parts[2]),
        ])
    }

    /// Join three positions into the serialized value.
    ///
    /// Returns `None` when all three positions are empty: no value is
    /// produced at all, rather than `",,"`.
    pub fn compose(positions: &[Option<String>; RANKED_POSITIONS]) -> Option<String> {
        if positions.iter().all(Option::is_none) {
            return None;
        }
        Some(
            positions
                .iter()
                .map(|p| p.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

fn position(part: &str) -> Option<String> {
    if part.is_empty() {
        None
    } else {
        Some(part.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(parts: [&str; 3]) -> [Option<String>; 3] {
        parts.map(|p| {
            if p.is_empty() {
                None
            } else {
                Some(p.to_string())
            }
        })
    }

    #[test]
    fn well_formed_round_trip() {
        let parts = RankedChoiceInput::decompose("a,b,c").unwrap();
        assert_eq!(parts, keys(["a", "b", "c"]));
        assert_eq!(RankedChoiceInput::compose(&parts).unwrap(), "a,b,c");
    }

    #[test]
    fn empty_decomposes_to_no_positions() {
        assert_eq!(RankedChoiceInput::decompose("").unwrap(), [None, None, None]);
    }

    #[test]
    fn all_empty_composes_to_nothing() {
        assert_eq!(RankedChoiceInput::compose(&[None, None, None]), None);
    }

    #[test]
    fn partial_positions_survive() {
        let parts = RankedChoiceInput::decompose("a,,c").unwrap();
        assert_eq!(parts, keys(["a", "", "c"]));
        assert_eq!(RankedChoiceInput::compose(&parts).unwrap(), "a,,c");
    }

    #[test]
    fn wrong_part_count_is_rejected() {
        assert_eq!(
            RankedChoiceInput::decompose("a,b"),
            Err(RankedChoiceError::WrongPartCount(2))
        );
        assert_eq!(
            RankedChoiceInput::decompose("a,b,c,d"),
            Err(RankedChoiceError::WrongPartCount(4))
        );
    }
}

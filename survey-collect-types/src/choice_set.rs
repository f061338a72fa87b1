use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ChoiceSetError;

/// A value in a `ChoiceSet`: either a 1-based position or an explicit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ChoiceValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for ChoiceValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// An ordered table of (value, label) pairs with derived constant names.
///
/// Built either from bare labels (each label paired with its 1-based
/// position) or from explicit (value, label) pairs. Each entry also gets a
/// constant-style name derived from its label: upper-cased, with spaces and
/// hyphens replaced by underscores.
///
/// The table serializes as its ordered pair sequence, so it reconstructs
/// unchanged through storage and migration tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(ChoiceValue, String)>", into = "Vec<(ChoiceValue, String)>")]
pub struct ChoiceSet {
    entries: Vec<ChoiceEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct ChoiceEntry {
    value: ChoiceValue,
    label: String,
    name: String,
}

impl ChoiceSet {
    /// Build from bare labels; each label gets its 1-based position as value.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (ChoiceValue::Int(i as i64 + 1), label.into())),
        )
    }

    /// Build from explicit (value, label) pairs.
    pub fn from_pairs<I, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, S)>,
        V: Into<ChoiceValue>,
        S: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(value, label)| {
                let label = label.into();
                let name = constant_name(&label);
                ChoiceEntry {
                    value: value.into(),
                    label,
                    name,
                }
            })
            .collect();
        Self { entries }
    }

    /// Get the (value, label) pair at the given position.
    pub fn get(&self, index: usize) -> Option<(&ChoiceValue, &str)> {
        self.entries
            .get(index)
            .map(|e| (&e.value, e.label.as_str()))
    }

    /// Get the first label whose value matches.
    pub fn display(&self, value: &ChoiceValue) -> Result<&str, ChoiceSetError> {
        self.entries
            .iter()
            .find(|e| &e.value == value)
            .map(|e| e.label.as_str())
            .ok_or_else(|| ChoiceSetError::NotFound(value.to_string()))
    }

    /// Look up a value by its derived constant name.
    pub fn value_of(&self, name: &str) -> Option<&ChoiceValue> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// Iterate over (value, label) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChoiceValue, &str)> {
        self.entries.iter().map(|e| (&e.value, e.label.as_str()))
    }

    /// Iterate over the derived constant names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compatibility constructor: a bare string splits on whitespace into labels.
impl FromStr for ChoiceSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_labels(s.split_whitespace()))
    }
}

impl From<Vec<(ChoiceValue, String)>> for ChoiceSet {
    fn from(pairs: Vec<(ChoiceValue, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<ChoiceSet> for Vec<(ChoiceValue, String)> {
    fn from(set: ChoiceSet) -> Self {
        set.entries
            .into_iter()
            .map(|e| (e.value, e.label))
            .collect()
    }
}

fn constant_name(label: &str) -> String {
    label
        .to_uppercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

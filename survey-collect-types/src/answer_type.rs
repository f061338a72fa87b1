use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ChoiceSet;

/// The closed set of answer type codes.
///
/// Each code determines how a question's answer is collected, validated,
/// and stored. The set is fixed: every code has exactly one form variant,
/// resolved by the registry in the `survey-collect` crate.
///
/// Codes serialize as their stable one-character storage code so that
/// persisted questions survive migration tooling unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerType {
    /// Single-line text input.
    Char,

    /// Integer input.
    Integer,

    /// Floating-point input.
    Float,

    /// A single checkbox.
    Bool,

    /// Multi-line text input.
    Text,

    /// Date input.
    Date,

    /// Single choice from a drop-down.
    Select,

    /// Single choice from a radio list.
    Choice,

    /// Single numeric choice from a drop-down.
    NumericSelect,

    /// Single numeric choice from a radio list.
    NumericChoice,

    /// Any number of choices from a checkbox list.
    BoolList,

    /// Email address input.
    Email,

    /// Image upload.
    Photo,

    /// Video URL input.
    Video,

    /// Free-text location, geocoded on save.
    Location,

    /// Ordered top-3 preference from the option list.
    Ranked,
}

impl AnswerType {
    /// Every answer type code, in declaration order.
    pub const ALL: [AnswerType; 16] = [
        Self::Char,
        Self::Integer,
        Self::Float,
        Self::Bool,
        Self::Text,
        Self::Date,
        Self::Select,
        Self::Choice,
        Self::NumericSelect,
        Self::NumericChoice,
        Self::BoolList,
        Self::Email,
        Self::Photo,
        Self::Video,
        Self::Location,
        Self::Ranked,
    ];

    /// The one-character storage code for this answer type.
    pub fn code(self) -> char {
        match self {
            Self::Char => 'c',
            Self::Integer => 'i',
            Self::Float => 'f',
            Self::Bool => 'b',
            Self::Text => 't',
            Self::Date => 'd',
            Self::Select => 's',
            Self::Choice => 'r',
            Self::NumericSelect => 'S',
            Self::NumericChoice => 'R',
            Self::BoolList => 'l',
            Self::Email => 'e',
            Self::Photo => 'p',
            Self::Video => 'v',
            Self::Location => 'x',
            Self::Ranked => 'k',
        }
    }

    /// Look up an answer type by its storage code.
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// The human-readable label for this answer type.
    pub fn display(self) -> &'static str {
        match self {
            Self::Char => "Text Field",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Bool => "Boolean",
            Self::Text => "Text Area",
            Self::Date => "Date",
            Self::Select => "Drop Down List",
            Self::Choice => "Radio List",
            Self::NumericSelect => "Numeric Drop Down List",
            Self::NumericChoice => "Numeric Radio List",
            Self::BoolList => "Checkbox List",
            Self::Email => "Email Field",
            Self::Photo => "Photo Upload",
            Self::Video => "Video Link",
            Self::Location => "Location Field",
            Self::Ranked => "Ranked Choice",
        }
    }

    /// Check if questions of this type carry an option list.
    pub fn is_choice_type(self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::Choice
                | Self::NumericSelect
                | Self::NumericChoice
                | Self::BoolList
                | Self::Ranked
        )
    }

    /// Check if this type collects multiple selections (checkbox group).
    pub fn is_multi_select(self) -> bool {
        self == Self::BoolList
    }

    /// The full (code, label) table as a `ChoiceSet`.
    ///
    /// This is the table storage and admin tooling enumerate when offering
    /// answer types for a question.
    pub fn choice_set() -> ChoiceSet {
        ChoiceSet::from_pairs(
            Self::ALL
                .into_iter()
                .map(|t| (t.code().to_string(), t.display().to_string())),
        )
    }
}

impl Serialize for AnswerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for AnswerType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = char::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown answer type code '{code}'")))
    }
}

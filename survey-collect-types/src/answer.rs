use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ContentLink;

/// One completed (or in-progress) response to an entire survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,

    pub survey_id: i64,

    pub submitted_at: DateTime<Utc>,

    pub ip_address: Option<IpAddr>,

    pub user_id: Option<i64>,

    pub session_key: String,

    /// False until moderated when the survey moderates submissions.
    pub is_public: bool,

    pub featured: bool,

    /// The content object this submission is attached to, if any.
    pub content: Option<ContentLink>,
}

/// One persisted response value for one question within one submission.
///
/// Created at submission-validation time and never mutated afterwards in the
/// normal flow; the one exception is the photo sync job filling in the
/// remote id of an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: i64,

    /// Absent for answers collected outside a full submission.
    pub submission_id: Option<i64>,

    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: i64, submission_id: Option<i64>, value: AnswerValue) -> Self {
        Self {
            question_id,
            submission_id,
            value,
        }
    }
}

/// A single answer value.
///
/// The semantic type depends on the parent question's answer type code.
/// Choice, ranked, video, and email answers are stored as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerValue {
    Text(String),

    Integer(i64),

    Float(f64),

    Bool(bool),

    Date(NaiveDate),

    /// A stored upload reference.
    Photo(StoredImage),

    /// A location string plus best-effort derived coordinates.
    Location(LocationValue),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a stored image.
    pub fn as_photo(&self) -> Option<&StoredImage> {
        match self {
            Self::Photo(image) => Some(image),
            _ => None,
        }
    }

    /// Try to get this value as a location.
    pub fn as_location(&self) -> Option<&LocationValue> {
        match self {
            Self::Location(location) => Some(location),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::Date(_) => "Date",
            Self::Photo(_) => "Photo",
            Self::Location(_) => "Location",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for AnswerValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for AnswerValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// A reference to an uploaded image held by the external file storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Path or key within the file storage.
    pub filename: String,

    pub width: u32,

    pub height: u32,

    /// Id assigned by the external media host after syncing, if any.
    pub remote_id: Option<String>,
}

impl StoredImage {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
            remote_id: None,
        }
    }

    /// Check if this image has been synced to the external media host.
    pub fn is_synced(&self) -> bool {
        self.remote_id.is_some()
    }
}

/// A free-text location answer with best-effort coordinates.
///
/// The coordinate pair is `(None, None)` whenever geocoding failed; the
/// text value is persisted regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationValue {
    pub text: String,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

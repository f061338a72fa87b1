/// Error type for `ChoiceSet` lookups.
#[derive(Debug, thiserror::Error)]
pub enum ChoiceSetError {
    /// No entry with the requested value.
    #[error("no choice with value '{0}'")]
    NotFound(String),
}

/// Configuration error: an answer type code outside the closed set.
///
/// This is a programming-error class, not a user-recoverable condition;
/// question validation keeps stored codes inside the set.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no answer form registered for answer type code '{0}'")]
    UnknownCode(char),
}

/// A field-level validation failure with user-facing text.
///
/// All user input errors surface as lists of these; they are never raised
/// past the form validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FieldError(pub String);

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The standard required-but-empty message.
    pub fn required() -> Self {
        Self::new("This field is required.")
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

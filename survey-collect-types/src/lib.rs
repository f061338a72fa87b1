//! Core types for the survey-collect crate.
//!
//! This crate provides the storage-agnostic data model for collected surveys:
//! - `Survey` and `Question` - What is being asked
//! - `AnswerType` - The closed set of answer type codes
//! - `ChoiceSet` - Ordered (value, label) tables with derived constant names
//! - `Submission`, `Answer`, and `AnswerValue` - What was collected
//!
//! Persistence is a collaborator, not a concern of this crate: every record
//! here serializes with serde so an external storage layer can round-trip it.

mod answer_type;
pub use answer_type::AnswerType;

mod choice_set;
pub use choice_set::{ChoiceSet, ChoiceValue};

mod survey;
pub use survey::{ContentLink, Question, Survey};

mod answer;
pub use answer::{Answer, AnswerValue, LocationValue, StoredImage, Submission};

mod error;
pub use error::{ChoiceSetError, FieldError, RegistryError};

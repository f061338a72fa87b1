//! # survey-collect
//!
//! Survey data collection over a storage-agnostic data model.
//!
//! An operator defines surveys of typed questions; this crate renders the
//! matching input forms, validates posted answers, and materializes the
//! records one submission produces. Persistence, HTTP, templates, and the
//! actual third-party geocoding and media services stay behind traits or
//! outside the crate entirely.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_collect::{Runtime, SubmissionSource, SurveyConfig, forms_for_survey};
//! use survey_collect::geo::GeoLookup;
//!
//! let config = SurveyConfig::default();
//! let runtime = Runtime::new(&config, &geo);
//!
//! let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), session_key, None);
//! match forms.save_all(&runtime, &context) {
//!     Ok(outcome) => store(outcome),
//!     Err(errors) => render_with_errors(errors),
//! }
//! ```
//!
//! Validation failures are per-field message lists, never errors propagated
//! out of the form boundary; a submission with any invalid answer produces
//! no records at all.

// Re-export the data model types.
pub use survey_collect_types::*;

pub mod assembler;
pub mod config;
pub mod filter;
pub mod form_data;
pub mod forms;
pub mod geo;
pub mod media_sync;
pub mod ranked;
pub mod registry;
pub mod sanitize;

pub use assembler::{
    ErrorMap, SubmissionContext, SubmissionForm, SubmissionOutcome, SubmissionSource, SurveyForms,
    forms_for_survey,
};
pub use config::{SurveyConfig, ThumbnailSizes};
pub use filter::SubmissionFilter;
pub use form_data::{Binding, FormData, UploadedFile};
pub use forms::{
    AnswerForm, AnswerValidator, ChoiceOption, EmbedProvider, FieldSpec, Runtime, Validated,
};
pub use geo::{Candidate, GeoLookup, Geocoder};
pub use media_sync::{MediaHost, sync_unsynced_photos};
pub use ranked::{RankedChoiceError, RankedChoiceInput};
pub use registry::AnswerTypeRegistry;

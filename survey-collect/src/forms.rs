//! Per-question answer forms.
//!
//! Every question gets a form with one field, `answer`, whose behavior is
//! determined by the question's answer type. The shared `AnswerForm` carries
//! the question, binding, and namespace; a per-type `AnswerValidator`
//! strategy supplies coercion, validation, and the records to persist.
//!
//! Validation failures are field-level message lists. `save` only builds
//! records; whether and where they are stored is the caller's concern.

use survey_collect_types::{Answer, AnswerValue, FieldError, LocationValue, Question};

use crate::config::SurveyConfig;
use crate::form_data::Binding;
use crate::geo::GeoLookup;
use crate::registry::AnswerTypeRegistry;
use crate::sanitize::option_key;

mod boolean;
mod location;
mod media;
mod option;
mod scalar;

pub use boolean::BooleanValidator;
pub use location::LocationValidator;
pub use media::{PhotoValidator, VideoValidator};
pub use option::{OptionValidator, RankedValidator};
pub use scalar::{DateValidator, EmailValidator, FloatValidator, IntegerValidator, TextValidator};

/// The shared per-request services, built once at startup and passed by
/// reference into form validation and save.
#[derive(Clone, Copy)]
pub struct Runtime<'a> {
    pub config: &'a SurveyConfig,
    pub geo: &'a GeoLookup,
    pub embed: Option<&'a dyn EmbedProvider>,
}

impl<'a> Runtime<'a> {
    /// A runtime with no embed-expansion capability.
    pub fn new(config: &'a SurveyConfig, geo: &'a GeoLookup) -> Self {
        Self {
            config,
            geo,
            embed: None,
        }
    }

    /// Attach an embed-expansion capability.
    pub fn with_embed(mut self, embed: &'a dyn EmbedProvider) -> Self {
        self.embed = Some(embed);
        self
    }
}

impl std::fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("geo", &self.geo)
            .field("embed", &self.embed.is_some())
            .finish()
    }
}

/// An embed-expansion capability for video URLs.
///
/// When configured, a video answer is accepted only if the service can
/// expand it; the configured URL pattern list is ignored.
pub trait EmbedProvider {
    /// Expand a URL into embed markup, or `None` if the service cannot.
    fn expand(&self, url: &str) -> anyhow::Result<Option<String>>;
}

/// The outcome of validating one answer form.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// No answer given, and none was required.
    Empty,

    /// One coerced value; saves as a single answer.
    Value(AnswerValue),

    /// Selected option keys; saves one answer per key.
    Keys(Vec<String>),

    /// A non-empty location string; geocoded at save time.
    LocationText(String),
}

/// Field metadata for rendering one answer input.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// The full posted field name, e.g. `"3_7-answer"`.
    pub name: String,

    pub label: String,

    pub help_text: String,

    pub required: bool,

    /// Built option list for choice-like types.
    pub choices: Option<Vec<ChoiceOption>>,
}

/// One selectable option: the sanitized key posted back by the client, and
/// the original (possibly marked-up) text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub key: String,
    pub display: String,
}

impl ChoiceOption {
    fn blank() -> Self {
        Self {
            key: String::new(),
            display: "---------".to_string(),
        }
    }
}

/// Type-specific coercion and validation for one answer type.
pub trait AnswerValidator {
    /// Whether an empty answer is a validation error.
    ///
    /// Mirrors the question unless the type exempts itself (boolean).
    fn required(&self, question: &Question) -> bool {
        question.required
    }

    /// Whether this input collects multiple selections (checkbox group).
    fn is_multi_select(&self) -> bool {
        false
    }

    /// Validate the form's bound input.
    fn validate(&self, form: &AnswerForm, runtime: &Runtime) -> Result<Validated, Vec<FieldError>>;
}

/// One question's form: a single `answer` field configured from the
/// question, bound to a namespaced subset of the posted data.
pub struct AnswerForm<'a> {
    question: &'a Question,
    session_key: String,
    submission_id: Option<i64>,
    prefix: String,
    binding: Binding<'a>,
    validator: Box<dyn AnswerValidator>,
}

impl<'a> AnswerForm<'a> {
    /// Build the form for a question.
    ///
    /// The namespace prefix is `{survey_id}_{question_id}`.
    pub fn new(
        question: &'a Question,
        session_key: impl Into<String>,
        submission_id: Option<i64>,
        binding: Binding<'a>,
    ) -> Self {
        Self {
            prefix: format!("{}_{}", question.survey_id, question.id),
            question,
            session_key: session_key.into(),
            submission_id,
            binding,
            validator: AnswerTypeRegistry::resolve(question.answer_type),
        }
    }

    pub fn question(&self) -> &Question {
        self.question
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    /// Whether the answer field is required, after type exemptions.
    pub fn required(&self) -> bool {
        self.validator.required(self.question)
    }

    /// Field metadata mirroring the question: label from the prompt text,
    /// help text copied through, option list built for choice types.
    pub fn field_spec(&self) -> FieldSpec {
        FieldSpec {
            name: crate::form_data::field_name(&self.prefix, "answer"),
            label: self.question.question.clone(),
            help_text: self.question.help_text.clone(),
            required: self.required(),
            choices: self.choice_options(),
        }
    }

    /// The built option list, or `None` for non-choice types.
    ///
    /// Each declared option is sanitized into its selectable key while the
    /// original markup is kept for display. A blank "no selection" entry is
    /// injected only when the field is not required and not a checkbox
    /// group.
    pub fn choice_options(&self) -> Option<Vec<ChoiceOption>> {
        if !self.question.answer_type.is_choice_type() {
            return None;
        }
        let mut choices: Vec<ChoiceOption> = self
            .question
            .options
            .iter()
            .map(|option| ChoiceOption {
                key: option_key(option),
                display: option.clone(),
            })
            .collect();
        if !self.required() && !self.validator.is_multi_select() {
            choices.insert(0, ChoiceOption::blank());
        }
        Some(choices)
    }

    /// The sanitized keys a posted selection is checked against.
    pub(crate) fn option_keys(&self) -> Vec<String> {
        self.question.options.iter().map(|o| option_key(o)).collect()
    }

    /// First posted value of the answer field, empty filtered out.
    pub(crate) fn value(&self) -> Option<&'a str> {
        self.binding
            .value(&self.prefix, "answer")
            .filter(|v| !v.is_empty())
    }

    /// All posted values of the answer field, empties filtered out.
    pub(crate) fn list(&self) -> Vec<&'a str> {
        self.binding
            .list(&self.prefix, "answer")
            .iter()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Posted value of one ranked position field (`answer_0` .. `answer_2`).
    pub(crate) fn position(&self, index: usize) -> Option<&'a str> {
        self.binding
            .value(&self.prefix, &format!("answer_{index}"))
            .filter(|v| !v.is_empty())
    }

    /// Uploaded file of the answer field.
    pub(crate) fn file(&self) -> Option<&'a crate::form_data::UploadedFile> {
        self.binding.file(&self.prefix, "answer")
    }

    /// Validate the bound input.
    pub fn validate(&self, runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        self.validator.validate(self, runtime)
    }

    /// Build the answer records for a validated value.
    ///
    /// Multi-select and single-choice answers produce one record per
    /// selected key; everything else produces at most one. Location answers
    /// trigger the best-effort geocoding lookup here, whose failure never
    /// blocks the text value.
    pub fn save(&self, validated: Validated, runtime: &Runtime) -> Vec<Answer> {
        match validated {
            Validated::Empty => Vec::new(),
            Validated::Value(value) => vec![self.answer(value)],
            Validated::Keys(keys) => keys
                .into_iter()
                .map(|key| self.answer(AnswerValue::Text(key)))
                .collect(),
            Validated::LocationText(text) => {
                let (latitude, longitude) = runtime.geo.resolve(&text);
                vec![self.answer(AnswerValue::Location(LocationValue {
                    text,
                    latitude,
                    longitude,
                }))]
            }
        }
    }

    fn answer(&self, value: AnswerValue) -> Answer {
        Answer::new(self.question.id, self.submission_id, value)
    }
}

impl std::fmt::Debug for AnswerForm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerForm")
            .field("question", &self.question.id)
            .field("prefix", &self.prefix)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Shared required/empty handling for single-value inputs.
///
/// Returns `Ok(None)` when no input was given and none was required.
pub(crate) fn scalar_input<'a>(
    form: &AnswerForm<'a>,
) -> Result<Option<&'a str>, Vec<FieldError>> {
    match form.value() {
        Some(value) => Ok(Some(value)),
        None if form.required() => Err(vec![FieldError::required()]),
        None => Ok(None),
    }
}

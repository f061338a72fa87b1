//! Building the full set of forms for one survey submission.
//!
//! One submission-level form plus one answer form per question, ordered by
//! the question's declared position, each answer form bound to its own
//! `{survey_id}_{question_id}` namespace within the posted data.

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_collect_types::{Answer, FieldError, Submission, Survey};

use crate::form_data::{Binding, FormData};
use crate::forms::{AnswerForm, Runtime, Validated};

/// Where a submission's input comes from.
///
/// Preview mode carries no input; forms are constructed unbound purely to
/// enumerate the expected fields.
#[derive(Debug, Clone, Copy)]
pub enum SubmissionSource<'a> {
    Preview,
    Posted(&'a FormData),
}

/// Request-side facts about one submission attempt.
///
/// These cover exactly the system-managed submission fields that are never
/// collected from the posted form data.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    /// Id for the new submission record, allocated by the caller's storage.
    pub submission_id: i64,

    pub submitted_at: DateTime<Utc>,

    pub ip_address: Option<IpAddr>,

    pub user_id: Option<i64>,

    pub session_key: String,
}

/// The submission-level form.
///
/// Collects fields on the submission entity itself, excluding the
/// system-managed ones (parent survey, timestamp, requester address, owning
/// user, visibility and moderation flags), which all come from the
/// `SubmissionContext` instead. With the current model that leaves no
/// user-editable fields, so the form's job is building the record.
#[derive(Debug)]
pub struct SubmissionForm<'a> {
    survey: &'a Survey,
    binding: Binding<'a>,
}

impl<'a> SubmissionForm<'a> {
    /// Submission fields never collected from posted data.
    pub const EXCLUDED_FIELDS: [&'static str; 6] = [
        "survey",
        "submitted_at",
        "ip_address",
        "user",
        "is_public",
        "featured",
    ];

    pub fn new(survey: &'a Survey, binding: Binding<'a>) -> Self {
        Self { survey, binding }
    }

    pub fn survey(&self) -> &Survey {
        self.survey
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    /// Build the submission record from the request context.
    ///
    /// New submissions start hidden when the survey moderates submissions.
    pub fn build(&self, context: &SubmissionContext) -> Submission {
        Submission {
            id: context.submission_id,
            survey_id: self.survey.id,
            submitted_at: context.submitted_at,
            ip_address: context.ip_address,
            user_id: context.user_id,
            session_key: context.session_key.clone(),
            is_public: !self.survey.moderate_submissions,
            featured: false,
            content: self.survey.content.clone(),
        }
    }
}

/// Per-form validation failures, keyed by the form's namespace prefix.
pub type ErrorMap = BTreeMap<String, Vec<FieldError>>;

/// All records produced by one valid submission.
///
/// Serializable as a unit so the whole bundle can be handed to storage or
/// queued for later processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub submission: Submission,
    pub answers: Vec<Answer>,
}

/// The forms needed to render and validate one full survey submission.
#[derive(Debug)]
pub struct SurveyForms<'a> {
    pub submission: SubmissionForm<'a>,
    pub answers: Vec<AnswerForm<'a>>,
}

impl SurveyForms<'_> {
    /// Validate every answer form.
    ///
    /// Returns the validated values in question order, or the complete map
    /// of per-form errors. Partial results are never produced.
    pub fn validate_all(&self, runtime: &Runtime) -> Result<Vec<Validated>, ErrorMap> {
        let mut validated = Vec::with_capacity(self.answers.len());
        let mut errors = ErrorMap::new();
        for form in &self.answers {
            match form.validate(runtime) {
                Ok(value) => validated.push(value),
                Err(field_errors) => {
                    errors.insert(form.prefix().to_string(), field_errors);
                }
            }
        }
        if errors.is_empty() {
            Ok(validated)
        } else {
            Err(errors)
        }
    }

    /// Validate everything, then build the submission and its answers.
    ///
    /// All-or-nothing: any field error yields the full error map and no
    /// records at all. Answer records are stamped with the new submission's
    /// id unless their form was constructed against an existing submission.
    pub fn save_all(
        &self,
        runtime: &Runtime,
        context: &SubmissionContext,
    ) -> Result<SubmissionOutcome, ErrorMap> {
        let validated = self.validate_all(runtime)?;

        let submission = self.submission.build(context);
        let mut answers = Vec::new();
        for (form, value) in self.answers.iter().zip(validated) {
            for mut answer in form.save(value, runtime) {
                if answer.submission_id.is_none() {
                    answer.submission_id = Some(submission.id);
                }
                answers.push(answer);
            }
        }

        Ok(SubmissionOutcome {
            submission,
            answers,
        })
    }
}

/// Build the forms for one survey and submission context.
///
/// `existing_submission` attaches collected answers to an already-stored
/// submission instead of a new one.
pub fn forms_for_survey<'a>(
    survey: &'a Survey,
    source: SubmissionSource<'a>,
    session_key: &str,
    existing_submission: Option<i64>,
) -> SurveyForms<'a> {
    let binding = match source {
        SubmissionSource::Preview => Binding::Unbound,
        SubmissionSource::Posted(data) => Binding::Bound(data),
    };
    let answers = survey
        .questions_in_order()
        .into_iter()
        .map(|question| AnswerForm::new(question, session_key, existing_submission, binding))
        .collect();
    SurveyForms {
        submission: SubmissionForm::new(survey, binding),
        answers,
    }
}

#[cfg(test)]
mod tests {
    use survey_collect_types::{AnswerType, Question};

    use crate::config::SurveyConfig;
    use crate::geo::GeoLookup;

    use super::*;

    fn survey() -> Survey {
        Survey::new(1, "feedback")
            .with_question(
                Question::new(11, 1, "How many visits?", AnswerType::Integer)
                    .with_order(2)
                    .required(),
            )
            .with_question(
                Question::new(10, 1, "Your name?", AnswerType::Char)
                    .with_order(1)
                    .required(),
            )
    }

    #[test]
    fn forms_follow_question_order() {
        let survey = survey();
        let forms = forms_for_survey(&survey, SubmissionSource::Preview, "", None);

        let prefixes: Vec<_> = forms.answers.iter().map(|f| f.prefix().to_string()).collect();
        assert_eq!(prefixes, vec!["1_10", "1_11"]);
    }

    #[test]
    fn preview_forms_are_unbound_and_enumerate_fields() {
        let survey = survey();
        let forms = forms_for_survey(&survey, SubmissionSource::Preview, "", None);

        assert!(!forms.submission.is_bound());
        let spec = forms.answers[0].field_spec();
        assert_eq!(spec.name, "1_10-answer");
        assert_eq!(spec.label, "Your name?");
        assert!(spec.required);
    }

    #[test]
    fn invalid_field_fails_the_whole_submission() {
        let survey = survey();
        let config = SurveyConfig::default();
        let geo = GeoLookup::disabled();
        let runtime = Runtime::new(&config, &geo);

        let data = FormData::new()
            .with_value("1_10-answer", "Alice")
            .with_value("1_11-answer", "not a number");
        let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

        let errors = forms
            .save_all(
                &runtime,
                &SubmissionContext {
                    submission_id: 99,
                    submitted_at: Utc::now(),
                    ip_address: None,
                    user_id: None,
                    session_key: String::new(),
                },
            )
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("1_11"));
    }

    #[test]
    fn valid_submission_produces_all_records() {
        let survey = survey();
        let config = SurveyConfig::default();
        let geo = GeoLookup::disabled();
        let runtime = Runtime::new(&config, &geo);

        let data = FormData::new()
            .with_value("1_10-answer", "Alice")
            .with_value("1_11-answer", "4");
        let forms = forms_for_survey(&survey, SubmissionSource::Posted(&data), "", None);

        let outcome = forms
            .save_all(
                &runtime,
                &SubmissionContext {
                    submission_id: 99,
                    submitted_at: Utc::now(),
                    ip_address: None,
                    user_id: None,
                    session_key: "abc".to_string(),
                },
            )
            .unwrap();
        assert_eq!(outcome.submission.id, 99);
        assert!(outcome.submission.is_public);
        assert_eq!(outcome.answers.len(), 2);
        assert!(outcome
            .answers
            .iter()
            .all(|a| a.submission_id == Some(99)));
    }
}

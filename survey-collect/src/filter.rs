//! Filtering surveys and submissions for operator reporting.
//!
//! Filter parameters arrive as posted/query fields; parsing them shares the
//! field-level error style of the answer forms. A content filter is a
//! (content type, object id) pair and must arrive whole: a pk without a
//! content type, or the reverse, is a broken relation.

use survey_collect_types::{ContentLink, FieldError, Submission, Survey};

use crate::form_data::FormData;

/// Parsed filter criteria for surveys and their submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFilter {
    /// The user who created the survey.
    pub creator: Option<i64>,

    pub is_published: bool,

    /// Restrict to surveys attached to this content object.
    pub content: Option<ContentLink>,
}

impl Default for SubmissionFilter {
    fn default() -> Self {
        Self {
            creator: None,
            is_published: true,
            content: None,
        }
    }
}

impl SubmissionFilter {
    /// Parse filter criteria from posted parameters.
    ///
    /// Recognized fields: `content_type` (an `app_label.model_name` path),
    /// `object_pk`, `creator`, `is_published` (defaults to true).
    pub fn from_params(params: &FormData) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let content_type = match params.value("content_type").filter(|v| !v.is_empty()) {
            Some(value) => match value.split('.').collect::<Vec<_>>()[..] {
                [app_label, model] if !app_label.is_empty() && !model.is_empty() => {
                    Some(value.to_string())
                }
                _ => {
                    errors.push(FieldError::new("invalid format 'app_label.model_name'"));
                    None
                }
            },
            None => None,
        };

        let object_pk = match params.value("object_pk").filter(|v| !v.is_empty()) {
            Some(value) => match value.parse::<i64>() {
                Ok(pk) => Some(pk),
                Err(_) => {
                    errors.push(FieldError::new("invalid object pk"));
                    None
                }
            },
            None => None,
        };

        let content = match (content_type, object_pk) {
            (Some(content_type), Some(object_pk)) => Some(ContentLink::new(content_type, object_pk)),
            (None, None) => None,
            _ => {
                errors.push(FieldError::new("broken relation"));
                None
            }
        };

        let creator = match params.value("creator").filter(|v| !v.is_empty()) {
            Some(value) => match value.parse::<i64>() {
                Ok(pk) => Some(pk),
                Err(_) => {
                    errors.push(FieldError::new("invalid user pk"));
                    None
                }
            },
            None => None,
        };

        let is_published = match params.value("is_published") {
            Some(value) => !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | ""),
            None => true,
        };

        if errors.is_empty() {
            Ok(Self {
                creator,
                is_published,
                content,
            })
        } else {
            Err(errors)
        }
    }

    /// Check a survey against the criteria.
    pub fn matches_survey(&self, survey: &Survey) -> bool {
        if survey.is_published != self.is_published {
            return false;
        }
        if let Some(creator) = self.creator
            && survey.creator != Some(creator)
        {
            return false;
        }
        if let Some(content) = &self.content
            && survey.content.as_ref() != Some(content)
        {
            return false;
        }
        true
    }

    /// Check a submission against the criteria via its survey.
    pub fn matches_submission(&self, submission: &Submission, survey: &Survey) -> bool {
        submission.survey_id == survey.id && self.matches_survey(survey)
    }

    /// Filter a submission list down to those matching the criteria.
    pub fn submissions<'a>(
        &'a self,
        submissions: &'a [Submission],
        survey: &'a Survey,
    ) -> impl Iterator<Item = &'a Submission> {
        submissions
            .iter()
            .filter(move |s| self.matches_submission(s, survey))
    }
}

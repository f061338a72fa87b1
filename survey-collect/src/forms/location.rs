use survey_collect_types::FieldError;

use super::{AnswerForm, AnswerValidator, Runtime, Validated, scalar_input};

/// Free-text location.
///
/// No format validation beyond non-empty; the coordinate lookup happens at
/// save time and its failure never blocks persisting the text value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationValidator;

impl AnswerValidator for LocationValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => Ok(Validated::LocationText(value.to_string())),
            None => Ok(Validated::Empty),
        }
    }
}

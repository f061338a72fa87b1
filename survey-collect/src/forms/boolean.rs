use survey_collect_types::{AnswerValue, FieldError, Question};

use super::{AnswerForm, AnswerValidator, Runtime, Validated};

/// A single checkbox.
///
/// Never required: one lone boolean being mandatory makes no sense in a
/// survey, so the question's required flag is not mirrored. A missing or
/// unchecked value validates to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl AnswerValidator for BooleanValidator {
    fn required(&self, _question: &Question) -> bool {
        false
    }

    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        let checked = match form.value() {
            None => false,
            Some(value) => !matches!(value.to_ascii_lowercase().as_str(), "false" | "0"),
        };
        Ok(Validated::Value(AnswerValue::Bool(checked)))
    }
}

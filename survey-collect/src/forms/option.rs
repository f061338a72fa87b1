//! Choice answer validators: select, radio, checkbox group, ranked.

use survey_collect_types::{AnswerValue, FieldError};

use crate::ranked::{RANKED_POSITIONS, RankedChoiceInput};

use super::{AnswerForm, AnswerValidator, Runtime, Validated};

fn not_a_choice(key: &str) -> FieldError {
    FieldError::new(format!(
        "Select a valid choice. {key} is not one of the available choices."
    ))
}

/// Single or multiple choice from the question's option list.
///
/// Posted keys are checked against the sanitized option keys; the drop-down
/// and radio variants differ only in presentation.
#[derive(Debug, Clone, Copy)]
pub struct OptionValidator {
    multi: bool,
}

impl OptionValidator {
    /// Single selection (drop-down or radio list).
    pub fn single() -> Self {
        Self { multi: false }
    }

    /// Multiple selections (checkbox group).
    pub fn checkbox() -> Self {
        Self { multi: true }
    }
}

impl AnswerValidator for OptionValidator {
    fn is_multi_select(&self) -> bool {
        self.multi
    }

    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        let keys = if self.multi {
            form.list().into_iter().map(str::to_string).collect()
        } else {
            form.value().map(str::to_string).into_iter().collect::<Vec<_>>()
        };

        if keys.is_empty() {
            if form.required() {
                return Err(vec![FieldError::required()]);
            }
            return Ok(Validated::Empty);
        }

        let options = form.option_keys();
        let errors: Vec<FieldError> = keys
            .iter()
            .filter(|key| !options.contains(*key))
            .map(|key| not_a_choice(key))
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Validated::Keys(keys))
    }
}

/// Ordered top-3 preference from the option list.
///
/// Each position is validated independently; empty positions are allowed.
/// The combined preference is stored as one comma-joined answer, not three.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedValidator;

impl AnswerValidator for RankedValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        let options = form.option_keys();
        let mut positions: [Option<String>; RANKED_POSITIONS] = [const { None }; RANKED_POSITIONS];
        let mut errors = Vec::new();

        for (index, position) in positions.iter_mut().enumerate() {
            if let Some(key) = form.position(index) {
                if options.contains(&key.to_string()) {
                    *position = Some(key.to_string());
                } else {
                    errors.push(not_a_choice(key));
                }
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        match RankedChoiceInput::compose(&positions) {
            Some(serialized) => Ok(Validated::Value(AnswerValue::Text(serialized))),
            None if form.required() => Err(vec![FieldError::required()]),
            None => Ok(Validated::Empty),
        }
    }
}

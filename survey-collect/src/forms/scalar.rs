//! Scalar answer validators: text, integer, float, date, email.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use survey_collect_types::{AnswerValue, FieldError};

use super::{AnswerForm, AnswerValidator, Runtime, Validated, scalar_input};

// Domain labels must be non-empty, so doubled or leading/trailing dots in
// the domain are rejected.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern"));

/// Free text, single- or multi-line. The widget difference is presentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextValidator;

impl AnswerValidator for TextValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => Ok(Validated::Value(AnswerValue::Text(value.to_string()))),
            None => Ok(Validated::Empty),
        }
    }
}

/// Whole number input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerValidator;

impl AnswerValidator for IntegerValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map(|i| Validated::Value(AnswerValue::Integer(i)))
                .map_err(|_| vec![FieldError::new("Enter a whole number.")]),
            None => Ok(Validated::Empty),
        }
    }
}

/// Floating-point input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatValidator;

impl AnswerValidator for FloatValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map(|f| Validated::Value(AnswerValue::Float(f)))
                .map_err(|_| vec![FieldError::new("Enter a number.")]),
            None => Ok(Validated::Empty),
        }
    }
}

/// ISO date input (`YYYY-MM-DD`, what the date picker posts).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl AnswerValidator for DateValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map(|d| Validated::Value(AnswerValue::Date(d)))
                .map_err(|_| vec![FieldError::new("Enter a valid date.")]),
            None => Ok(Validated::Empty),
        }
    }
}

/// Email address input.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl AnswerValidator for EmailValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        match scalar_input(form)? {
            Some(value) => {
                let value = value.trim();
                if EMAIL.is_match(value) {
                    Ok(Validated::Value(AnswerValue::Text(value.to_string())))
                } else {
                    Err(vec![FieldError::new("Enter a valid email address.")])
                }
            }
            None => Ok(Validated::Empty),
        }
    }
}

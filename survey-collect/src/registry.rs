//! Answer type to form variant dispatch.
//!
//! Each question gets a form with one field determined by its answer type.
//! The mapping is total over the closed `AnswerType` set and fixed at
//! compile time; the code-based lookup exists for callers holding a raw
//! storage code, where an unknown code is a configuration error.

use survey_collect_types::{AnswerType, RegistryError};

use crate::forms::{
    AnswerValidator, BooleanValidator, DateValidator, EmailValidator, FloatValidator,
    IntegerValidator, LocationValidator, OptionValidator, PhotoValidator, RankedValidator,
    TextValidator, VideoValidator,
};

/// The static answer-type-to-validator mapping.
#[derive(Debug, Clone, Copy)]
pub struct AnswerTypeRegistry;

impl AnswerTypeRegistry {
    /// The form validator for an answer type. Total by construction.
    pub fn resolve(answer_type: AnswerType) -> Box<dyn AnswerValidator> {
        match answer_type {
            AnswerType::Char | AnswerType::Text => Box::new(TextValidator),
            AnswerType::Integer => Box::new(IntegerValidator),
            AnswerType::Float => Box::new(FloatValidator),
            AnswerType::Bool => Box::new(BooleanValidator),
            AnswerType::Date => Box::new(DateValidator),
            AnswerType::Email => Box::new(EmailValidator),
            AnswerType::Photo => Box::new(PhotoValidator),
            AnswerType::Video => Box::new(VideoValidator),
            AnswerType::Location => Box::new(LocationValidator),
            AnswerType::Select
            | AnswerType::Choice
            | AnswerType::NumericSelect
            | AnswerType::NumericChoice => Box::new(OptionValidator::single()),
            AnswerType::BoolList => Box::new(OptionValidator::checkbox()),
            AnswerType::Ranked => Box::new(RankedValidator),
        }
    }

    /// Resolve from a raw storage code.
    pub fn resolve_code(code: char) -> Result<Box<dyn AnswerValidator>, RegistryError> {
        AnswerType::from_code(code)
            .map(Self::resolve)
            .ok_or(RegistryError::UnknownCode(code))
    }
}

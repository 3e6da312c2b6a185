use thiserror::Error;

use crate::domain::condition::value_objects::FieldType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Cannot convert `{value}` to {target}")]
    Format { value: String, target: FieldType },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown field `{0}`")]
    UnknownField(String),
}

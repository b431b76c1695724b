use thiserror::Error;

use crate::models::AttributeError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional write's precondition did not hold.
    #[error("Conditional check failed for key '{key}'")]
    ConditionFailed { key: String },

    #[error("{0}")]
    Backend(String),

    #[error("Malformed item: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn condition_failed(key: impl Into<String>) -> Self {
        StoreError::ConditionFailed { key: key.into() }
    }
}

impl From<AttributeError> for StoreError {
    fn from(err: AttributeError) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

//! Domain errors for the stance forecasting system.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur while forecasting or simulating stances.
///
/// Lookups on read paths never produce these; they return `None` or an empty
/// collection instead. Mutating paths (updating a model, scheduling or running
/// a refresh) fail loudly with one of the variants below.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Forecast model not found: {0}")]
    ModelNotFound(Uuid),

    #[error("Refresh schedule not found: {0}")]
    ScheduleNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

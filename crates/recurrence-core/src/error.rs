//! Error types for recurrence-core operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecurrenceError {
    /// A required argument was absent (e.g. a `null` string from JavaScript).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Recurrence rule has no frequency")]
    MissingFrequency,

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;

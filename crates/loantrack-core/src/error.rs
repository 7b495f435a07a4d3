use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanTrackError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanTrackError {
    fn from(e: serde_json::Error) -> Self {
        LoanTrackError::SerializationError(e.to_string())
    }
}

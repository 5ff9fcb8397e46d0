use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when code tries to move a redacted secret through a serializer.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}

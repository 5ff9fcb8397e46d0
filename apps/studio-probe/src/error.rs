use common::ErrorLocation;

use thiserror::Error;

/// Errors that end a probe run before a connection state is known.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Logger could not be set up
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Environment settings could not be read
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    /// Unclassified failure from the connection manager
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

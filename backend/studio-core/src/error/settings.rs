use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SettingsError {
    #[error("Client Options Error: {message} {location}")]
    ClientBuild {
        message: String,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for SettingsError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        SettingsError::ClientBuild {
            message: error.to_string(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

use crate::connection::ConnectionState;
use crate::error::settings::SettingsError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// A request failure whose cause has already been classified.
///
/// Each variant corresponds to exactly one error [`ConnectionState`]; the
/// manager records that state before handing the error back.
#[derive(Debug, ThisError)]
pub enum RequestError {
    #[error("Network Error: failed to reach '{url}': {message} {location}")]
    Network {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Response Not Ok Error: unexpected {status} {reason} response from '{url}' {location}")]
    ResponseNotOk {
        url: String,
        status: HttpStatusCode,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid Response Error: invalid JSON from '{url}': {message} {location}")]
    InvalidResponse {
        url: String,
        message: String,
        location: ErrorLocation,
    },
}

impl RequestError {
    #[track_caller]
    pub(crate) fn network(url: &str, error: &reqwest::Error) -> Self {
        RequestError::Network {
            url: url.to_string(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// A URL no request can be sent to, such as one without a scheme.
    #[track_caller]
    pub(crate) fn unreachable_url(url: &str, message: impl Into<String>) -> Self {
        RequestError::Network {
            url: url.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn response_not_ok(url: &str, status: reqwest::StatusCode) -> Self {
        RequestError::ResponseNotOk {
            url: url.to_string(),
            status: HttpStatusCode(status.as_u16()),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn invalid_response(url: &str, message: impl Into<String>) -> Self {
        RequestError::InvalidResponse {
            url: url.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The connection state this failure puts the manager into.
    pub fn state(&self) -> ConnectionState {
        match self {
            RequestError::Network { .. } => ConnectionState::NetworkError,
            RequestError::ResponseNotOk { .. } => ConnectionState::ResponseNotOk,
            RequestError::InvalidResponse { .. } => ConnectionState::InvalidResponse,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RequestError::Network { url, .. }
            | RequestError::ResponseNotOk { url, .. }
            | RequestError::InvalidResponse { url, .. } => url,
        }
    }
}

/// Everything `configure` and `refresh_identity` can fail with.
///
/// Only [`ConnectionError::Request`] is classified. `configure` swallows it
/// after logging; every other variant reaches the caller.
#[derive(Debug, ThisError)]
pub enum ConnectionError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),

    #[error("Not Configured Error: {message} {location}")]
    NotConfigured {
        message: String,
        location: ErrorLocation,
    },
}

impl ConnectionError {
    pub fn is_classified(&self) -> bool {
        matches!(self, ConnectionError::Request(_))
    }
}

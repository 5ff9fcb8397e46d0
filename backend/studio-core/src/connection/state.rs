use crate::connection::credentials::CredentialMode;
use crate::connection::identity::Identity;

use std::fmt;

/// Observable state of the connection. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No server address configured.
    #[default]
    Unconfigured,
    /// Server reachable, no credentials configured, anonymous session.
    Connected,
    /// Server reports a non-anonymous user.
    LoggedIn,
    /// Transport failure reaching the server.
    NetworkError,
    /// Server reachable but answered with a failure status.
    ResponseNotOk,
    /// Response body was not the expected JSON.
    InvalidResponse,
    /// Credentials configured but the session is still anonymous.
    IncorrectLogin,
}

impl ConnectionState {
    /// State after a successful identity check.
    pub fn from_identity(identity: &Identity, credentials: &CredentialMode) -> Self {
        match (identity.is_anonymous(), credentials.is_configured()) {
            (true, true) => ConnectionState::IncorrectLogin,
            (true, false) => ConnectionState::Connected,
            (false, _) => ConnectionState::LoggedIn,
        }
    }

    /// One of the classified request failure states.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ConnectionState::NetworkError
                | ConnectionState::ResponseNotOk
                | ConnectionState::InvalidResponse
        )
    }

    /// The server can be talked to on behalf of the current session.
    pub fn is_usable(&self) -> bool {
        matches!(self, ConnectionState::LoggedIn | ConnectionState::Connected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Unconfigured => "unconfigured",
            ConnectionState::Connected => "connected",
            ConnectionState::LoggedIn => "logged_in",
            ConnectionState::NetworkError => "network_error",
            ConnectionState::ResponseNotOk => "response_not_ok",
            ConnectionState::InvalidResponse => "invalid_response",
            ConnectionState::IncorrectLogin => "incorrect_login",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

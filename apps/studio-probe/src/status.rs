//! User-facing wording for connection states.

use studio_core::ConnectionState;

/// Outcome of a connection check as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub state: ConnectionState,
    pub usable: bool,
    pub message: String,
}

/// Map a connection state to a message.
///
/// `login_provided` picks between the two incorrect-login messages: a broken
/// host-provided session is a deployment problem, not a typo.
pub fn status_report(state: ConnectionState, login_provided: bool) -> StatusReport {
    let message = match state {
        ConnectionState::LoggedIn => "Connection established, logged in.",
        ConnectionState::Connected => {
            "Server reachable, but no login is configured. Uploads need a login."
        }
        ConnectionState::Unconfigured => "No server URL configured.",
        ConnectionState::NetworkError => {
            "The server could not be reached. Check the server URL and your network connection."
        }
        ConnectionState::ResponseNotOk => "The server responded with an error.",
        ConnectionState::InvalidResponse => {
            "The server sent an invalid response. Is this URL really a capture server?"
        }
        ConnectionState::IncorrectLogin if login_provided => {
            "The login provided by the hosting page is not valid for this server."
        }
        ConnectionState::IncorrectLogin => "Incorrect username or password.",
    };

    StatusReport {
        state,
        usable: state.is_usable(),
        message: message.to_string(),
    }
}

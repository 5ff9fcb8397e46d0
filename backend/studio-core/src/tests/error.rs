// Unit tests for connection error types
// Tests state mapping and message formatting

use crate::connection::ConnectionState;
use crate::error::{ConnectionError, RequestError, SettingsError};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

/// **VALUE**: Verifies that each classified failure maps to its own error state.
///
/// **WHY THIS MATTERS**: The manager records `error.state()` when a request fails. A wrong
/// mapping would tell the user "server unreachable" when the server answered with 500.
///
/// **BUG THIS CATCHES**: Would catch swapped match arms in `RequestError::state`.
#[test]
fn given_request_errors_when_mapped_then_each_has_matching_state() {
    let location = ErrorLocation::from(Location::caller());
    let network = RequestError::Network {
        url: "https://x/info/me.json".to_string(),
        message: "connection refused".to_string(),
        location,
    };
    let not_ok = RequestError::ResponseNotOk {
        url: "https://x/info/me.json".to_string(),
        status: HttpStatusCode(500),
        reason: "Internal Server Error".to_string(),
        location,
    };
    let invalid = RequestError::InvalidResponse {
        url: "https://x/info/me.json".to_string(),
        message: "expected value at line 1 column 1".to_string(),
        location,
    };

    assert_eq!(network.state(), ConnectionState::NetworkError);
    assert_eq!(not_ok.state(), ConnectionState::ResponseNotOk);
    assert_eq!(invalid.state(), ConnectionState::InvalidResponse);
    assert_eq!(invalid.url(), "https://x/info/me.json");
}

/// **VALUE**: Verifies that the response error message carries status, reason and URL.
///
/// **WHY THIS MATTERS**: `configure` only logs classified failures. The log line is the
/// only place the actual status code is visible.
///
/// **BUG THIS CATCHES**: Would catch if the Display format dropped any of these parts.
#[test]
fn given_response_not_ok_when_formatted_then_includes_status_reason_url_and_location() {
    let err = RequestError::ResponseNotOk {
        url: "https://x/info/me.json".to_string(),
        status: HttpStatusCode(503),
        reason: "Service Unavailable".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let message = err.to_string();

    assert!(message.contains("Response Not Ok Error"));
    assert!(message.contains("503 Service Unavailable"));
    assert!(message.contains("https://x/info/me.json"));
    assert!(message.contains("error.rs"));
}

/// **VALUE**: Verifies which connection errors are classified.
///
/// **WHY THIS MATTERS**: `configure` swallows exactly the classified ones; everything else
/// must reach the caller.
///
/// **BUG THIS CATCHES**: Would catch if settings errors were treated as classified and
/// silently dropped.
#[test]
fn given_connection_errors_when_checked_then_only_requests_are_classified() {
    let location = ErrorLocation::from(Location::caller());

    let request: ConnectionError = RequestError::InvalidResponse {
        url: String::from("u"),
        message: String::from("m"),
        location,
    }
    .into();
    let settings: ConnectionError = SettingsError::ClientBuild {
        message: String::from("no tls backend"),
        location,
    }
    .into();
    let unconfigured = ConnectionError::NotConfigured {
        message: String::from("no server"),
        location,
    };

    assert!(request.is_classified());
    assert!(!settings.is_classified());
    assert!(!unconfigured.is_classified());
    assert!(settings.to_string().contains("no tls backend"));
}

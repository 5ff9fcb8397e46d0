use crate::connection::{ConnectionState, CredentialMode, Identity};

use serde_json::json;

fn identity(username: &str) -> Identity {
    serde_json::from_value(json!({"user": {"username": username}})).unwrap()
}

/// **VALUE**: Verifies the full decision table after a successful identity check.
///
/// **WHY THIS MATTERS**: This table is the contract with the UI: `Connected` means
/// "reachable, nobody tried to log in", `IncorrectLogin` means "credentials were rejected".
///
/// **BUG THIS CATCHES**: Would catch if `Implicit` were treated like `None`, which would
/// report a broken host login as a healthy anonymous connection.
#[test]
fn given_identity_and_credentials_when_deriving_state_then_matches_table() {
    let explicit = CredentialMode::Explicit {
        username: "alice".to_string(),
        password: common::RedactedSecret::new("secret"),
    };

    assert_eq!(
        ConnectionState::from_identity(&identity("anonymous"), &CredentialMode::None),
        ConnectionState::Connected
    );
    assert_eq!(
        ConnectionState::from_identity(&identity("anonymous"), &CredentialMode::Implicit),
        ConnectionState::IncorrectLogin
    );
    assert_eq!(
        ConnectionState::from_identity(&identity("anonymous"), &explicit),
        ConnectionState::IncorrectLogin
    );
    assert_eq!(
        ConnectionState::from_identity(&identity("alice"), &explicit),
        ConnectionState::LoggedIn
    );
    assert_eq!(
        ConnectionState::from_identity(&identity("bob"), &CredentialMode::None),
        ConnectionState::LoggedIn
    );
}

#[test]
fn given_states_when_classified_then_errors_and_usable_are_disjoint() {
    let all = [
        ConnectionState::Unconfigured,
        ConnectionState::Connected,
        ConnectionState::LoggedIn,
        ConnectionState::NetworkError,
        ConnectionState::ResponseNotOk,
        ConnectionState::InvalidResponse,
        ConnectionState::IncorrectLogin,
    ];

    let errors: Vec<_> = all.iter().filter(|s| s.is_error()).collect();
    let usable: Vec<_> = all.iter().filter(|s| s.is_usable()).collect();

    assert_eq!(errors.len(), 3);
    assert_eq!(usable.len(), 2);
    assert!(errors.iter().all(|s| !s.is_usable()));
    assert_eq!(ConnectionState::default(), ConnectionState::Unconfigured);
}

/// **VALUE**: Verifies the wire names of the states.
///
/// **WHY THIS MATTERS**: UI collaborators key their messages on these names.
///
/// **BUG THIS CATCHES**: Would catch drift between `as_str` and `Display`.
#[test]
fn given_state_when_displayed_then_uses_snake_case() {
    assert_eq!(ConnectionState::LoggedIn.to_string(), "logged_in");
    assert_eq!(ConnectionState::ResponseNotOk.as_str(), "response_not_ok");
    assert_eq!(ConnectionState::IncorrectLogin.as_str(), "incorrect_login");
    assert_eq!(
        ConnectionState::NetworkError.to_string(),
        ConnectionState::NetworkError.as_str()
    );
}

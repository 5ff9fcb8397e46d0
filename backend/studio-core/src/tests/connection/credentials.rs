use crate::connection::CredentialMode;
use crate::settings::ConnectionSettings;

/// **VALUE**: Verifies that the "login provided" flag wins over a username/password pair.
///
/// **WHY THIS MATTERS**: When running inside the server's own pages the session cookie is
/// already there. Sending stored credentials would log in as someone else.
///
/// **BUG THIS CATCHES**: Would catch if the checks were reordered.
#[test]
fn given_login_provided_and_credentials_when_deriving_mode_then_implicit() {
    let settings = ConnectionSettings::default()
        .with_login_provided(true)
        .with_login("alice", "secret");

    let mode = CredentialMode::from_settings(&settings);

    assert_eq!(mode, CredentialMode::Implicit);
    assert!(mode.is_configured());
    assert!(mode.is_implicit());
}

/// **VALUE**: Verifies that a username/password pair becomes explicit credentials.
///
/// **WHY THIS MATTERS**: Explicit mode is the only mode that triggers the login request.
///
/// **BUG THIS CATCHES**: Would catch if the password were not carried over.
#[test]
fn given_username_and_password_when_deriving_mode_then_explicit() {
    let settings = ConnectionSettings::default().with_login("alice", "secret");

    let mode = CredentialMode::from_settings(&settings);

    match mode {
        CredentialMode::Explicit { username, password } => {
            assert_eq!(username, "alice");
            assert_eq!(password.expose(), "secret");
        }
        other => panic!("Expected explicit credentials, got {other:?}"),
    }
}

/// **VALUE**: Verifies that half a credential pair counts as no credentials.
///
/// **WHY THIS MATTERS**: A username without a password must not trigger a login attempt;
/// the session is treated as anonymous and ends in `Connected`, not `IncorrectLogin`.
///
/// **BUG THIS CATCHES**: Would catch an `||` where an `&&` belongs.
#[test]
fn given_incomplete_credentials_when_deriving_mode_then_none() {
    let name_only = ConnectionSettings::default().with_login("alice", "");
    let password_only = ConnectionSettings::default().with_login("", "secret");
    let mut name_without_password = ConnectionSettings::default();
    name_without_password.login_name = Some("alice".to_string());

    assert_eq!(CredentialMode::from_settings(&name_only), CredentialMode::None);
    assert_eq!(
        CredentialMode::from_settings(&password_only),
        CredentialMode::None
    );
    assert_eq!(
        CredentialMode::from_settings(&name_without_password),
        CredentialMode::None
    );
}

/// **VALUE**: Verifies that Debug output of explicit credentials hides the password.
///
/// **WHY THIS MATTERS**: The manager logs itself at debug level after init.
///
/// **BUG THIS CATCHES**: Would catch if the password field lost its redacting wrapper.
#[test]
fn given_explicit_mode_when_debug_formatted_then_password_hidden() {
    let mode = CredentialMode::from_settings(
        &ConnectionSettings::default().with_login("alice", "hunter2"),
    );

    let debug = format!("{mode:?}");

    assert!(debug.contains("alice"));
    assert!(!debug.contains("hunter2"));
    assert_eq!(mode.describe(), "username and password");
}

use super::helpers::{
    IDENTITY_PATH, anonymous_settings, identity_body, mount_identity, unreachable_server_url,
};

use studio_core::error::ConnectionError;
use studio_core::{ConnectionManager, ConnectionSettings, ConnectionState};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that a fresh manager is unconfigured and has no identity.
///
/// **WHY THIS MATTERS**: The UI renders straight from `state()` before any settings exist.
///
/// **BUG THIS CATCHES**: Would catch a different default state.
#[test]
fn given_new_manager_when_inspected_then_unconfigured() {
    let manager = ConnectionManager::new().expect("client should build");

    assert_eq!(manager.state(), ConnectionState::Unconfigured);
    assert!(manager.current_identity().is_none());
    assert!(manager.server_address().is_none());
    assert!(!manager.is_login_provided());
}

/// **VALUE**: Verifies that an anonymous session without credentials is `Connected`.
///
/// **WHY THIS MATTERS**: This is the "server reachable, nobody logged in" outcome the
/// settings page uses to tell the user that only credentials are missing.
///
/// **BUG THIS CATCHES**: Would catch if no-credential sessions were reported as
/// `IncorrectLogin`.
#[tokio::test]
async fn given_no_credentials_and_anonymous_identity_when_configured_then_connected() {
    // GIVEN: A server that reports an anonymous session
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;

    // WHEN: Configuring without credentials
    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .expect("configure should not fail");

    // THEN: Connected, with the anonymous identity stored
    assert_eq!(manager.state(), ConnectionState::Connected);
    assert_eq!(
        manager.current_identity().map(|i| i.username()),
        Some("anonymous")
    );
    assert_eq!(manager.workflow_id(), Some("fast"));
}

/// **VALUE**: Verifies that a trailing slash is stripped and requests still hit the
/// right endpoint.
///
/// **WHY THIS MATTERS**: Users paste server URLs with and without trailing slashes.
///
/// **BUG THIS CATCHES**: Would catch a double slash in the request path, which the mock
/// server would not match.
#[tokio::test]
async fn given_server_url_with_trailing_slash_when_configured_then_normalized() {
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;
    let mut manager = ConnectionManager::new().unwrap();

    manager
        .configure(&ConnectionSettings::default().with_server_url(format!("{}/", server.uri())))
        .await
        .unwrap();

    assert_eq!(manager.server_address(), Some(server.uri().as_str()));
    assert_eq!(manager.state(), ConnectionState::Connected);

    manager
        .configure(&ConnectionSettings::default().with_server_url(server.uri()))
        .await
        .unwrap();

    assert_eq!(manager.server_address(), Some(server.uri().as_str()));
}

/// **VALUE**: Verifies that empty settings reset everything, whatever came before.
///
/// **WHY THIS MATTERS**: Clearing the server URL must also forget who was logged in, or
/// the UI would keep showing the old user.
///
/// **BUG THIS CATCHES**: Would catch if the identity survived the reset to
/// `Unconfigured`.
#[tokio::test]
async fn given_logged_in_manager_when_configured_with_empty_settings_then_unconfigured() {
    // GIVEN: A manager with a non-anonymous identity
    let server = MockServer::start().await;
    mount_identity(&server, "bob").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server).with_login_provided(true))
        .await
        .unwrap();
    assert_eq!(manager.state(), ConnectionState::LoggedIn);

    // WHEN: Configuring with no server address
    manager
        .configure(&ConnectionSettings::default())
        .await
        .unwrap();

    // THEN: Everything is cleared
    assert_eq!(manager.state(), ConnectionState::Unconfigured);
    assert!(manager.current_identity().is_none());
    assert!(manager.config().is_none());
    assert!(manager.workflow_id().is_none());
    assert!(manager.credential_mode().is_none());
}

/// **VALUE**: Verifies that unconfigured settings never touch the network.
///
/// **WHY THIS MATTERS**: The settings page may call `configure` with partial settings on
/// every change.
///
/// **BUG THIS CATCHES**: Would catch if the identity check ran with a stale address.
#[tokio::test]
async fn given_empty_server_url_when_configured_then_no_request_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body("anonymous")))
        .expect(0)
        .mount(&server)
        .await;

    let manager = ConnectionManager::init(&ConnectionSettings::default().with_server_url(""))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::Unconfigured);
}

/// **VALUE**: Verifies that the same settings against the same server give the same state.
///
/// **WHY THIS MATTERS**: The UI re-runs `configure` when the user presses "test" again.
///
/// **BUG THIS CATCHES**: Would catch state leaking from one attempt into the next.
#[tokio::test]
async fn given_identical_settings_when_configured_twice_then_same_state() {
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;
    let settings = anonymous_settings(&server);
    let mut manager = ConnectionManager::new().unwrap();

    manager.configure(&settings).await.unwrap();
    let first = manager.state();
    manager.configure(&settings).await.unwrap();

    assert_eq!(first, ConnectionState::Connected);
    assert_eq!(manager.state(), first);
}

/// **VALUE**: Verifies that error states are not sticky.
///
/// **WHY THIS MATTERS**: After a server hiccup the user retries; a successful retry must
/// show as connected.
///
/// **BUG THIS CATCHES**: Would catch if a successful identity check only set the state
/// when the previous state was not an error.
#[tokio::test]
async fn given_error_state_when_configured_against_healthy_server_then_recovers() {
    // GIVEN: A server failing with 500
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();
    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);

    // WHEN: The server recovers and the manager is configured again
    server.reset().await;
    mount_identity(&server, "anonymous").await;
    manager.configure(&anonymous_settings(&server)).await.unwrap();

    // THEN: Connected
    assert_eq!(manager.state(), ConnectionState::Connected);
}

/// **VALUE**: Verifies that the last good identity survives a later failed attempt.
///
/// **WHY THIS MATTERS**: The identity is only replaced by a new successful fetch; the UI
/// may still show who was last seen while reporting the error.
///
/// **BUG THIS CATCHES**: Would catch if error paths cleared the identity.
#[tokio::test]
async fn given_identity_when_later_request_fails_then_identity_retained() {
    // GIVEN: A manager that saw user bob
    let server = MockServer::start().await;
    mount_identity(&server, "bob").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();
    assert_eq!(manager.state(), ConnectionState::LoggedIn);

    // WHEN: Reconfigured against a server that cannot be reached
    manager
        .configure(&ConnectionSettings::default().with_server_url(unreachable_server_url()))
        .await
        .unwrap();

    // THEN: Network error, but bob is still the last known identity
    assert_eq!(manager.state(), ConnectionState::NetworkError);
    assert_eq!(manager.current_identity().map(|i| i.username()), Some("bob"));
}

/// **VALUE**: Verifies that an address without a scheme replaces the old connection and
/// ends in `NetworkError`.
///
/// **WHY THIS MATTERS**: The user just entered a different server. Reporting the previous
/// logged-in session for it would be a lie.
///
/// **BUG THIS CATCHES**: Would catch rejecting the settings up front, which left the old
/// server, identity and `LoggedIn` state in place, or returning the failure instead of
/// recording it.
#[tokio::test]
async fn given_logged_in_manager_when_configured_with_schemeless_url_then_network_error() {
    // GIVEN: A manager logged in against a healthy server
    let server = MockServer::start().await;
    mount_identity(&server, "alice").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server).with_login_provided(true))
        .await
        .unwrap();
    assert_eq!(manager.state(), ConnectionState::LoggedIn);

    // WHEN: Reconfigured with an address that has no scheme
    let result = manager
        .configure(&ConnectionSettings::default().with_server_url("capture.example.org"))
        .await;

    // THEN: Not returned, new address stored, state is NetworkError
    assert!(result.is_ok(), "classified failures must not escape configure");
    assert_eq!(manager.state(), ConnectionState::NetworkError);
    assert_eq!(manager.server_address(), Some("capture.example.org"));
    assert!(!manager.is_login_provided());
    assert_eq!(
        manager.current_identity().map(|i| i.username()),
        Some("alice")
    );
}

#[tokio::test]
async fn given_non_http_url_when_refreshing_identity_then_classified_network_error() {
    let mut manager = ConnectionManager::init(
        &ConnectionSettings::default().with_server_url("ftp://capture.example.org"),
    )
    .await
    .unwrap();
    assert_eq!(manager.state(), ConnectionState::NetworkError);

    let result = manager.refresh_identity().await;

    assert!(matches!(result, Err(ConnectionError::Request(ref e)) if e.state() == ConnectionState::NetworkError));
}

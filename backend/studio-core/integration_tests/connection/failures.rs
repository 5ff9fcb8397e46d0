use super::helpers::{
    IDENTITY_PATH, LOGIN_PATH, anonymous_settings, identity_body, login_settings,
    mount_identity, unreachable_server_url,
};

use studio_core::error::ConnectionError;
use studio_core::{ClientOptions, ConnectionManager, ConnectionSettings, ConnectionState};

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_identity_response(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies that an unreachable server ends in `NetworkError` without an error
/// being returned from `configure`.
///
/// **WHY THIS MATTERS**: The caller learns the outcome from `state()`; a returned error
/// would make the settings page show a generic failure.
///
/// **BUG THIS CATCHES**: Would catch if classified failures escaped `configure`.
#[tokio::test]
async fn given_unreachable_server_when_configured_then_network_error() {
    let settings = ConnectionSettings::default().with_server_url(unreachable_server_url());

    let manager = ConnectionManager::init(&settings).await;

    let manager = manager.expect("classified failures must not escape configure");
    assert_eq!(manager.state(), ConnectionState::NetworkError);
    assert!(manager.current_identity().is_none());
}

/// **VALUE**: Verifies that a transport failure during login is a `NetworkError` too.
///
/// **WHY THIS MATTERS**: Login is the first request in explicit mode, so this is what the
/// user sees for a wrong host name.
///
/// **BUG THIS CATCHES**: Would catch if login errors were classified differently.
#[tokio::test]
async fn given_unreachable_server_with_credentials_when_configured_then_network_error() {
    let settings = ConnectionSettings::default()
        .with_server_url(unreachable_server_url())
        .with_login("alice", "wonderland");

    let manager = ConnectionManager::init(&settings).await.unwrap();

    assert_eq!(manager.state(), ConnectionState::NetworkError);
}

/// **VALUE**: Verifies that a 500 from the identity endpoint is `ResponseNotOk`.
///
/// **WHY THIS MATTERS**: A reachable but broken server needs a different message than an
/// unreachable one.
///
/// **BUG THIS CATCHES**: Would catch if the error body were handed to the JSON parser.
#[tokio::test]
async fn given_identity_endpoint_failing_when_configured_then_response_not_ok() {
    let server = MockServer::start().await;
    mount_identity_response(
        &server,
        ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
    )
    .await;

    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);
}

#[tokio::test]
async fn given_identity_endpoint_missing_when_configured_then_response_not_ok() {
    let server = MockServer::start().await;

    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);
}

/// **VALUE**: Verifies that a non-JSON body is `InvalidResponse`.
///
/// **WHY THIS MATTERS**: A server URL pointing at some other web site answers 200 with
/// HTML. That must not look like a working capture server.
///
/// **BUG THIS CATCHES**: Would catch if parse failures were reported as network errors.
#[tokio::test]
async fn given_identity_endpoint_returning_html_when_configured_then_invalid_response() {
    let server = MockServer::start().await;
    mount_identity_response(
        &server,
        ResponseTemplate::new(200).set_body_string("<!doctype html><p>Not Opencast</p>"),
    )
    .await;

    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::InvalidResponse);
}

/// **VALUE**: Verifies that JSON without a username is `InvalidResponse`.
///
/// **WHY THIS MATTERS**: Valid JSON of the wrong shape cannot be used to decide whether
/// the session is logged in.
///
/// **BUG THIS CATCHES**: Would catch a lenient identity model that defaults the username.
#[tokio::test]
async fn given_identity_without_user_when_configured_then_invalid_response() {
    let server = MockServer::start().await;
    mount_identity_response(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"roles": []})),
    )
    .await;

    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::InvalidResponse);
}

/// **VALUE**: Verifies that a redirect from the identity endpoint is not followed.
///
/// **WHY THIS MATTERS**: Redirects are handed back as is. An identity endpoint that
/// redirects (e.g. to a login page) has no JSON body to offer.
///
/// **BUG THIS CATCHES**: Would catch a client that follows redirects, which would reach
/// the mocked login page and parse its JSON as an identity.
#[tokio::test]
async fn given_identity_endpoint_redirecting_when_configured_then_invalid_response() {
    let server = MockServer::start().await;
    mount_identity_response(
        &server,
        ResponseTemplate::new(302).insert_header("Location", "/elsewhere.json"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"user": {"username": "mallory"}})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::InvalidResponse);
    assert!(manager.current_identity().is_none());
}

/// **VALUE**: Verifies that `refresh_identity` returns classified failures to its caller.
///
/// **WHY THIS MATTERS**: Only `configure` swallows them. Direct callers of
/// `refresh_identity` need the error for their own logging.
///
/// **BUG THIS CATCHES**: Would catch if the swallowing moved down into `refresh_identity`.
#[tokio::test]
async fn given_failing_server_when_refresh_identity_called_then_returns_classified_error() {
    // GIVEN: A manager connected to a server that then starts failing
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();
    server.reset().await;
    mount_identity_response(&server, ResponseTemplate::new(503)).await;

    // WHEN: Refreshing the identity directly
    let result = manager.refresh_identity().await;

    // THEN: The classified failure is returned and recorded
    match result {
        Err(ConnectionError::Request(e)) => {
            assert_eq!(e.state(), ConnectionState::ResponseNotOk);
            assert!(e.url().ends_with(IDENTITY_PATH));
        }
        other => panic!("Expected classified request error, got {other:?}"),
    }
    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);
}

/// **VALUE**: Verifies that `refresh_identity` on an unconfigured manager is an
/// unclassified error.
///
/// **WHY THIS MATTERS**: There is no server to ask; the state must stay `Unconfigured`.
///
/// **BUG THIS CATCHES**: Would catch a request to a relative URL or a bogus error state.
#[tokio::test]
async fn given_unconfigured_manager_when_refresh_identity_called_then_not_configured() {
    let mut manager = ConnectionManager::new().unwrap();

    let result = manager.refresh_identity().await;

    assert!(matches!(result, Err(ConnectionError::NotConfigured { .. })));
    assert_eq!(manager.state(), ConnectionState::Unconfigured);
}

/// **VALUE**: Verifies that a login failing at transport level leaves earlier identity.
///
/// **WHY THIS MATTERS**: Same retention rule as for the identity request.
///
/// **BUG THIS CATCHES**: Would catch if the login path cleared the identity.
#[tokio::test]
async fn given_identity_when_login_fails_then_identity_retained() {
    let server = MockServer::start().await;
    mount_identity(&server, "bob").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    manager
        .configure(&login_settings(&server, "alice", "wonderland"))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);
    assert_eq!(manager.current_identity().map(|i| i.username()), Some("bob"));
}

/// **VALUE**: Verifies that a response slower than the client timeout is a
/// `NetworkError` and keeps the last identity.
///
/// **WHY THIS MATTERS**: A hanging server must not block the settings page forever, and
/// the timeout has to be reported like any other transport failure.
///
/// **BUG THIS CATCHES**: Would catch the timeout not reaching the HTTP client, or a
/// timed-out request being classified as `InvalidResponse`.
#[tokio::test]
async fn given_slow_identity_response_when_timeout_elapses_then_network_error() {
    // GIVEN: A manager with a short timeout that already saw user bob
    let server = MockServer::start().await;
    mount_identity(&server, "bob").await;
    let options = ClientOptions::default().with_timeout(Duration::from_millis(300));
    let mut manager = ConnectionManager::with_options(&options).unwrap();
    manager.configure(&anonymous_settings(&server)).await.unwrap();
    assert_eq!(manager.state(), ConnectionState::LoggedIn);

    // WHEN: The identity endpoint starts answering after the timeout
    server.reset().await;
    mount_identity_response(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(identity_body("carol"))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let result = manager.configure(&anonymous_settings(&server)).await;

    // THEN: Swallowed, NetworkError, bob retained
    assert!(result.is_ok());
    assert_eq!(manager.state(), ConnectionState::NetworkError);
    assert_eq!(manager.current_identity().map(|i| i.username()), Some("bob"));
}

/// **VALUE**: Verifies that a sub-second timeout still lets a healthy server through.
///
/// **WHY THIS MATTERS**: Tight timeouts are common on local networks.
///
/// **BUG THIS CATCHES**: Would catch a timeout rounded down to zero, which fails every
/// request immediately.
#[tokio::test]
async fn given_sub_second_timeout_when_server_is_healthy_then_connected() {
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;
    let options = ClientOptions::default().with_timeout(Duration::from_millis(500));
    let mut manager = ConnectionManager::with_options(&options).unwrap();

    manager.configure(&anonymous_settings(&server)).await.unwrap();

    assert_eq!(manager.state(), ConnectionState::Connected);
}

use super::helpers::{
    IDENTITY_PATH, LOGIN_PATH, SESSION_COOKIE, anonymous_settings, identity_body,
    login_redirect, login_settings, mount_identity,
};

use studio_core::{ConnectionManager, ConnectionState, CredentialMode};

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the full explicit login flow: form POST, session cookie, identity.
///
/// **WHY THIS MATTERS**: This is the main path for a standalone client. The login form
/// must carry the Spring Security field names and the session cookie set by the login
/// response must be sent with the identity check.
///
/// **BUG THIS CATCHES**: Would catch wrong form field names, a missing remember-me flag,
/// a client without a cookie store, or a client that follows the login redirect.
#[tokio::test]
async fn given_correct_credentials_when_configured_then_logged_in() {
    // GIVEN: A login endpoint that sets a session cookie for alice's credentials
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("j_username=alice"))
        .and(body_string_contains("j_password=wonderland"))
        .and(body_string_contains("_spring_security_remember_me=on"))
        .respond_with(login_redirect())
        .expect(1)
        .mount(&server)
        .await;

    // AND: An identity endpoint that knows alice only by her session cookie
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body("alice")))
        .mount(&server)
        .await;
    mount_identity(&server, "anonymous").await;

    // WHEN: Configuring with alice's credentials
    let manager = ConnectionManager::init(&login_settings(&server, "alice", "wonderland"))
        .await
        .unwrap();

    // THEN: Logged in as alice
    assert_eq!(manager.state(), ConnectionState::LoggedIn);
    let identity = manager.current_identity().expect("identity should be stored");
    assert_eq!(identity.username(), "alice");
    assert_eq!(identity.user.name.as_deref(), Some("alice display"));
    assert!(!manager.is_login_provided());
}

/// **VALUE**: Verifies that credentials the server ignores end in `IncorrectLogin`.
///
/// **WHY THIS MATTERS**: Spring Security answers a failed login with a redirect too. Only
/// the identity check reveals that the credentials were wrong.
///
/// **BUG THIS CATCHES**: Would catch if a successful login exchange alone produced
/// `LoggedIn`.
#[tokio::test]
async fn given_wrong_credentials_when_configured_then_incorrect_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login.html?error"))
        .expect(1)
        .mount(&server)
        .await;
    mount_identity(&server, "anonymous").await;

    let manager = ConnectionManager::init(&login_settings(&server, "alice", "wrong"))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::IncorrectLogin);
    assert!(manager.current_identity().is_some_and(|i| i.is_anonymous()));
}

/// **VALUE**: Verifies that a 200 from the login endpoint is also a successful exchange.
///
/// **WHY THIS MATTERS**: Some deployments answer the login POST directly instead of
/// redirecting.
///
/// **BUG THIS CATCHES**: Would catch if only redirects were accepted from the login.
#[tokio::test]
async fn given_login_answering_ok_when_configured_then_identity_decides() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>welcome</html>"))
        .mount(&server)
        .await;
    mount_identity(&server, "alice").await;

    let manager = ConnectionManager::init(&login_settings(&server, "alice", "wonderland"))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::LoggedIn);
}

/// **VALUE**: Verifies that a host-provided login skips the login request.
///
/// **WHY THIS MATTERS**: Inside the server's own pages the session already exists. Posting
/// credentials again is pointless and there are none to post.
///
/// **BUG THIS CATCHES**: Would catch if implicit mode were treated like explicit mode.
#[tokio::test]
async fn given_login_provided_when_configured_then_no_login_request() {
    // GIVEN: A login endpoint that must not be called
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_redirect())
        .expect(0)
        .mount(&server)
        .await;
    mount_identity(&server, "carol").await;

    // WHEN: Configuring with the login provided by the host
    let manager = ConnectionManager::init(
        &anonymous_settings(&server)
            .with_login_provided(true)
            .with_login("ignored", "ignored"),
    )
    .await
    .unwrap();

    // THEN: Logged in through the existing session
    assert_eq!(manager.state(), ConnectionState::LoggedIn);
    assert_eq!(manager.credential_mode(), Some(&CredentialMode::Implicit));
    assert!(manager.is_login_provided());
}

/// **VALUE**: Verifies that a host-provided login that turns out anonymous is incorrect.
///
/// **WHY THIS MATTERS**: The UI shows a dedicated message for a broken host login.
///
/// **BUG THIS CATCHES**: Would catch if implicit mode mapped to `Connected`.
#[tokio::test]
async fn given_login_provided_and_anonymous_identity_when_configured_then_incorrect_login() {
    let server = MockServer::start().await;
    mount_identity(&server, "anonymous").await;

    let manager = ConnectionManager::init(&anonymous_settings(&server).with_login_provided(true))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::IncorrectLogin);
    assert!(manager.is_login_provided());
}

/// **VALUE**: Verifies that a rejected login request stops before the identity check.
///
/// **WHY THIS MATTERS**: The identity check after a failed login would overwrite the
/// `ResponseNotOk` state with a misleading `IncorrectLogin`.
///
/// **BUG THIS CATCHES**: Would catch if login failures were ignored.
#[tokio::test]
async fn given_login_rejected_with_status_when_configured_then_response_not_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body("anonymous")))
        .expect(0)
        .mount(&server)
        .await;

    let manager = ConnectionManager::init(&login_settings(&server, "alice", "wonderland"))
        .await
        .unwrap();

    assert_eq!(manager.state(), ConnectionState::ResponseNotOk);
    assert!(manager.current_identity().is_none());
}

/// **VALUE**: Verifies that calling `login` without explicit credentials does nothing.
///
/// **WHY THIS MATTERS**: `login` is public; calling it in the wrong mode must not send
/// empty credentials.
///
/// **BUG THIS CATCHES**: Would catch a login request with placeholder values.
#[tokio::test]
async fn given_no_explicit_credentials_when_login_called_then_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_redirect())
        .expect(0)
        .mount(&server)
        .await;
    mount_identity(&server, "anonymous").await;
    let mut manager = ConnectionManager::init(&anonymous_settings(&server))
        .await
        .unwrap();

    let result = manager.login().await;

    assert!(result.is_ok());
    assert_eq!(manager.state(), ConnectionState::Connected);
}

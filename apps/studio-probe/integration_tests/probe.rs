use studio_probe::env_settings::ProbeSettings;
use studio_probe::probe;

use studio_core::{ClientOptions, ConnectionSettings, ConnectionState};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn probe_settings(connection: ConnectionSettings) -> ProbeSettings {
    ProbeSettings {
        connection,
        client: ClientOptions::default(),
    }
}

/// **VALUE**: Tests the probe end to end against a mock server with a real login.
///
/// **WHY THIS MATTERS**: This is the path the binary takes: settings in, report out.
///
/// **BUG THIS CATCHES**: Would catch if the probe lost the identity or server address
/// between the manager and the outcome.
#[tokio::test]
async fn given_working_server_when_probed_then_reports_logged_in_user() {
    // GIVEN: A server that accepts the login and reports alice
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin_ng/j_spring_security_check"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/info/me.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "username": "alice" }
        })))
        .mount(&server)
        .await;

    // WHEN: Probing with alice's credentials
    let outcome = probe::run(&probe_settings(
        ConnectionSettings::default()
            .with_server_url(format!("{}/", server.uri()))
            .with_login("alice", "wonderland"),
    ))
    .await
    .unwrap();

    // THEN: Usable, logged in as alice, normalized address
    assert_eq!(outcome.report.state, ConnectionState::LoggedIn);
    assert!(outcome.report.usable);
    assert_eq!(outcome.username.as_deref(), Some("alice"));
    assert_eq!(outcome.server_address, Some(server.uri()));
}

/// **VALUE**: Tests that server failures come back as a report, not an error.
///
/// **WHY THIS MATTERS**: The binary exits 1 for an unusable connection and 2 for a broken
/// setup. Mixing them up breaks scripts that check the exit code.
///
/// **BUG THIS CATCHES**: Would catch if classified failures escaped as `ProbeError`.
#[tokio::test]
async fn given_failing_server_when_probed_then_reports_unusable_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info/me.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let outcome = probe::run(&probe_settings(
        ConnectionSettings::default().with_server_url(server.uri()),
    ))
    .await
    .unwrap();

    assert_eq!(outcome.report.state, ConnectionState::ResponseNotOk);
    assert!(!outcome.report.usable);
    assert!(outcome.username.is_none());
}

/// **VALUE**: Tests that a server URL without a scheme is reported as unreachable.
///
/// **WHY THIS MATTERS**: A mistyped URL is a user error the report explains; it must not
/// exit as a broken setup.
///
/// **BUG THIS CATCHES**: Would catch a schemeless URL escaping as `ProbeError`.
#[tokio::test]
async fn given_schemeless_server_url_when_probed_then_reports_network_error() {
    let outcome = probe::run(&probe_settings(
        ConnectionSettings::default().with_server_url("develop.example.org"),
    ))
    .await
    .unwrap();

    assert_eq!(outcome.report.state, ConnectionState::NetworkError);
    assert!(!outcome.report.usable);
    assert_eq!(outcome.server_address.as_deref(), Some("develop.example.org"));
}

// Unit tests for ConnectionConfig derivation
// Network behavior is covered in integration_tests/connection

use crate::connection::config::{ConnectionConfig, normalize_server_address};
use crate::connection::{ConnectionState, CredentialMode};
use crate::settings::ConnectionSettings;

/// **VALUE**: Verifies that exactly one trailing slash is stripped.
///
/// **WHY THIS MATTERS**: Endpoint URLs are built as `{server}/{path}`. A leftover slash
/// produces `//info/me.json`, which some servers route differently.
///
/// **BUG THIS CATCHES**: Would catch a switch to `trim_end_matches('/')`, which strips
/// every trailing slash, or a missing normalization step.
#[test]
fn given_trailing_slash_when_normalized_then_strips_exactly_one() {
    assert_eq!(normalize_server_address("https://x/"), "https://x");
    assert_eq!(normalize_server_address("https://x"), "https://x");
    assert_eq!(normalize_server_address("https://x//"), "https://x/");
    assert_eq!(
        normalize_server_address("https://x/opencast/"),
        "https://x/opencast"
    );
}

/// **VALUE**: Verifies that settings without a server address produce no configuration.
///
/// **WHY THIS MATTERS**: "No configuration" is how the manager knows to go `Unconfigured`
/// without touching the network.
///
/// **BUG THIS CATCHES**: Would catch if an empty string were accepted as a server address.
#[test]
fn given_missing_or_empty_server_url_when_deriving_config_then_returns_none() {
    // GIVEN: Settings with workflow and login but no usable server address
    let absent = ConnectionSettings::default()
        .with_workflow_id("fast")
        .with_login("alice", "secret");
    let empty = absent.clone().with_server_url("");

    // WHEN / THEN: Both derive to no configuration
    assert!(ConnectionConfig::from_settings(&absent).is_none());
    assert!(ConnectionConfig::from_settings(&empty).is_none());
}

/// **VALUE**: Verifies that workflow id and credential mode are carried into the config.
///
/// **WHY THIS MATTERS**: The workflow id is opaque and must reach collaborators exactly as
/// the user typed it.
///
/// **BUG THIS CATCHES**: Would catch if the workflow id were trimmed or dropped.
#[test]
fn given_full_settings_when_deriving_config_then_keeps_values_verbatim() {
    let settings = ConnectionSettings::default()
        .with_server_url("https://develop.example.org/")
        .with_workflow_id(" schedule-and-upload ")
        .with_login("alice", "secret");

    let config = ConnectionConfig::from_settings(&settings).expect("config should be derived");

    assert_eq!(config.server_address(), "https://develop.example.org");
    assert_eq!(config.workflow_id(), Some(" schedule-and-upload "));
    assert!(config.credential_mode().is_explicit());
    assert_eq!(
        config.endpoint_url("info/me.json"),
        "https://develop.example.org/info/me.json"
    );
}

/// **VALUE**: Verifies that any non-empty address is accepted but only http(s) URLs
/// yield an endpoint.
///
/// **WHY THIS MATTERS**: A typo like `develop.example.org` (no scheme) is still a new
/// configuration; it has to replace the old one and then fail like an unreachable server.
///
/// **BUG THIS CATCHES**: Would catch rejecting such addresses before they are stored, or
/// classifying them as anything other than a network failure.
#[test]
fn given_non_http_server_url_when_resolving_endpoint_then_network_error() {
    for url in [
        "develop.example.org",
        "ftp://example.org",
        "not a url",
        "mailto:admin@example.org",
    ] {
        let settings = ConnectionSettings::default().with_server_url(url);
        let config = ConnectionConfig::from_settings(&settings).expect("address is non-empty");

        let error = config
            .endpoint("info/me.json")
            .expect_err("endpoint should be rejected");

        assert_eq!(error.state(), ConnectionState::NetworkError, "'{url}'");
        assert!(error.url().ends_with("/info/me.json"));
    }
}

#[test]
fn given_http_server_urls_when_resolving_endpoint_then_parsed() {
    for url in [
        "https://develop.example.org/",
        "http://localhost:8080",
        "https://example.org/opencast/",
    ] {
        let settings = ConnectionSettings::default().with_server_url(url);
        let config = ConnectionConfig::from_settings(&settings).unwrap();

        let endpoint = config.endpoint("info/me.json").expect("endpoint should parse");

        assert!(endpoint.as_str().ends_with("/info/me.json"), "'{url}'");
        assert!(!endpoint.as_str().contains("//info"));
    }
}

#[test]
fn given_no_login_when_deriving_config_then_mode_is_none() {
    let settings = ConnectionSettings::default().with_server_url("http://localhost:8080");

    let config = ConnectionConfig::from_settings(&settings).unwrap();

    assert_eq!(config.credential_mode(), &CredentialMode::None);
    assert_eq!(config.workflow_id(), None);
}

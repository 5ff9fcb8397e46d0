//! Test helpers for connection manager integration tests.
//!
//! - Mock server responses for the identity and login endpoints
//! - An address nothing listens on, for transport failures
//! - Settings shortcuts

use studio_core::ConnectionSettings;

use std::net::TcpListener;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const IDENTITY_PATH: &str = "/info/me.json";
pub const LOGIN_PATH: &str = "/admin_ng/j_spring_security_check";
pub const SESSION_COOKIE: &str = "JSESSIONID=node0abc123";

/// Identity payload for `username`.
pub fn identity_body(username: &str) -> serde_json::Value {
    json!({
        "user": { "username": username, "name": format!("{username} display") },
        "roles": ["ROLE_USER"],
        "org": { "id": "mh_default_org", "name": "Default Organization" }
    })
}

/// Identity endpoint answering with `username` for every request.
pub async fn mount_identity(server: &MockServer, username: &str) {
    Mock::given(method("GET"))
        .and(path(IDENTITY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body(username)))
        .mount(server)
        .await;
}

/// Login endpoint answering like Spring Security: a redirect plus a session cookie.
pub fn login_redirect() -> ResponseTemplate {
    ResponseTemplate::new(302)
        .insert_header("Location", "/admin_ng/index.html")
        .insert_header("Set-Cookie", format!("{SESSION_COOKIE}; Path=/; HttpOnly").as_str())
}

/// Base URL of a port nothing is listening on.
pub fn unreachable_server_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn anonymous_settings(server: &MockServer) -> ConnectionSettings {
    ConnectionSettings::default()
        .with_server_url(server.uri())
        .with_workflow_id("fast")
}

pub fn login_settings(server: &MockServer, user: &str, password: &str) -> ConnectionSettings {
    anonymous_settings(server).with_login(user, password)
}

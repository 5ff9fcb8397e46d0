use crate::env_settings::{
    LOGIN_NAME_VAR, LOGIN_PASSWORD_VAR, LOGIN_PROVIDED_VAR, ProbeSettings, SERVER_URL_VAR,
    TIMEOUT_SECS_VAR, WORKFLOW_ID_VAR,
};
use crate::error::ProbeError;

use std::collections::HashMap;
use std::time::Duration;

fn settings_from(vars: &[(&str, &str)]) -> Result<ProbeSettings, ProbeError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ProbeSettings::from_lookup(|name| map.get(name).cloned())
}

/// **VALUE**: Verifies that every `STUDIO_*` variable lands in the right field.
///
/// **WHY THIS MATTERS**: The probe is the only way to check a deployment's settings
/// outside the UI. A miswired variable would test different settings than intended.
///
/// **BUG THIS CATCHES**: Would catch swapped variable names.
#[test]
fn given_all_variables_when_loading_then_settings_are_filled() {
    let settings = settings_from(&[
        (SERVER_URL_VAR, "https://develop.example.org/"),
        (WORKFLOW_ID_VAR, "fast"),
        (LOGIN_NAME_VAR, "alice"),
        (LOGIN_PASSWORD_VAR, "wonderland"),
        (TIMEOUT_SECS_VAR, "15"),
    ])
    .unwrap();

    let connection = &settings.connection;
    assert_eq!(connection.server_url(), Some("https://develop.example.org/"));
    assert_eq!(connection.workflow_id.as_deref(), Some("fast"));
    assert!(!connection.login_provided);
    assert_eq!(connection.login_name.as_deref(), Some("alice"));
    assert_eq!(
        connection.login_password.as_ref().map(|p| p.expose()),
        Some("wonderland")
    );
    assert_eq!(settings.client.timeout(), Some(Duration::from_secs(15)));
}

/// **VALUE**: Verifies that empty variables count as unset.
///
/// **WHY THIS MATTERS**: `.env` templates often contain `STUDIO_LOGIN_PASSWORD=`. That must
/// not turn into an explicit login with an empty password.
///
/// **BUG THIS CATCHES**: Would catch if empty strings were passed through.
#[test]
fn given_empty_variables_when_loading_then_treated_as_absent() {
    let settings = settings_from(&[
        (SERVER_URL_VAR, ""),
        (LOGIN_NAME_VAR, "alice"),
        (LOGIN_PASSWORD_VAR, "  "),
    ])
    .unwrap();

    assert_eq!(settings.connection.server_url(), None);
    assert!(settings.connection.login_password.is_none());
    assert_eq!(settings.client.timeout(), None);
}

#[test]
fn given_login_provided_flag_when_loading_then_parsed_as_boolean() {
    for (raw, expected) in [("true", true), ("1", true), ("YES", true), ("off", false)] {
        let settings = settings_from(&[(LOGIN_PROVIDED_VAR, raw)]).unwrap();
        assert_eq!(settings.connection.login_provided, expected, "'{raw}'");
    }

    let result = settings_from(&[(LOGIN_PROVIDED_VAR, "maybe")]);
    assert!(matches!(result, Err(ProbeError::Settings { .. })));
}

#[test]
fn given_non_numeric_timeout_when_loading_then_settings_error() {
    let result = settings_from(&[(TIMEOUT_SECS_VAR, "soon")]);

    match result {
        Err(ProbeError::Settings { message, .. }) => assert!(message.contains("soon")),
        other => panic!("Expected settings error, got {other:?}"),
    }
}

//! Connection settings read from the environment.
//!
//! Stands in for the settings provider: every value comes from a `STUDIO_*`
//! variable, optionally loaded from a `.env` file first.

use crate::error::ProbeError;

use common::ErrorLocation;

use studio_core::{ClientOptions, ConnectionSettings};

use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

pub const SERVER_URL_VAR: &str = "STUDIO_SERVER_URL";
pub const WORKFLOW_ID_VAR: &str = "STUDIO_WORKFLOW_ID";
pub const LOGIN_PROVIDED_VAR: &str = "STUDIO_LOGIN_PROVIDED";
pub const LOGIN_NAME_VAR: &str = "STUDIO_LOGIN_NAME";
pub const LOGIN_PASSWORD_VAR: &str = "STUDIO_LOGIN_PASSWORD";
pub const TIMEOUT_SECS_VAR: &str = "STUDIO_TIMEOUT_SECS";
pub const LOG_DIR_VAR: &str = "STUDIO_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "STUDIO_LOG_LEVEL";

/// Load `.env` from the current directory if there is one.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Failed to parse .env: {e}");
            None
        }
    }
}

/// Everything the probe needs to run one connection check.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connection: ConnectionSettings,
    pub client: ClientOptions,
}

impl ProbeSettings {
    pub fn from_env() -> Result<Self, ProbeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProbeError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut connection = ConnectionSettings {
            server_url: var(SERVER_URL_VAR),
            workflow_id: var(WORKFLOW_ID_VAR),
            login_provided: var(LOGIN_PROVIDED_VAR)
                .map(|value| parse_flag(&value))
                .transpose()?
                .unwrap_or(false),
            ..ConnectionSettings::default()
        };
        if let (Some(name), Some(password)) = (var(LOGIN_NAME_VAR), var(LOGIN_PASSWORD_VAR)) {
            connection = connection.with_login(name, password);
        }

        let mut client = ClientOptions::default();
        if let Some(raw) = var(TIMEOUT_SECS_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ProbeError::Settings {
                message: format!("{TIMEOUT_SECS_VAR} must be a number of seconds, got '{raw}': {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
            client = client.with_timeout(Duration::from_secs(secs));
        }

        info!(
            "Settings: server={:?} workflow={:?} login_provided={} login_name={:?}",
            connection.server_url, connection.workflow_id, connection.login_provided, connection.login_name
        );

        Ok(Self { connection, client })
    }
}

#[track_caller]
fn parse_flag(value: &str) -> Result<bool, ProbeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ProbeError::Settings {
            message: format!("{LOGIN_PROVIDED_VAR} must be a boolean, got '{other}'"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

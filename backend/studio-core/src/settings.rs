//! Settings record supplied by the settings layer, plus HTTP client options.

use crate::error::settings::SettingsError;

use common::RedactedSecret;

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};

const DEFAULT_USER_AGENT: &str = concat!("studio-core/", env!("CARGO_PKG_VERSION"));

// ============================================
// CONNECTION SETTINGS
// ============================================

/// Connection settings as handed over by the settings provider.
///
/// Every field is optional. An absent or empty `server_url` means the
/// connection is unconfigured.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub workflow_id: Option<String>,
    /// The hosting environment has already authenticated the session.
    #[serde(default)]
    pub login_provided: bool,
    #[serde(default)]
    pub login_name: Option<String>,
    #[serde(default)]
    pub login_password: Option<RedactedSecret>,
}

impl ConnectionSettings {
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn with_workflow_id(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    pub fn with_login_provided(mut self, provided: bool) -> Self {
        self.login_provided = provided;
        self
    }

    pub fn with_login(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.login_name = Some(name.into());
        self.login_password = Some(RedactedSecret::new(password));
        self
    }

    /// Server URL if one is set and non-empty.
    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref().filter(|url| !url.is_empty())
    }
}

// ============================================
// CLIENT OPTIONS
// ============================================

/// Knobs for the HTTP client owned by a connection manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientOptions {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in milliseconds. `None` or `0` leaves requests
    /// to the network layer.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: None,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl ClientOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Build the HTTP client.
    ///
    /// Cookies set by the login endpoint are kept for later requests and
    /// redirects are handed back to the caller instead of being followed.
    pub fn build_client(&self) -> Result<Client, SettingsError> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .cookie_store(true)
            .redirect(Policy::none());

        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

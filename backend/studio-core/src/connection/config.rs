use crate::connection::credentials::CredentialMode;
use crate::error::connection::RequestError;
use crate::settings::ConnectionSettings;

use url::Url;

/// Immutable configuration of the active connection.
///
/// Reconfiguring replaces the whole value; the manager never edits it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    server_address: String,
    workflow_id: Option<String>,
    credential_mode: CredentialMode,
}

impl ConnectionConfig {
    /// Derive a configuration from settings.
    ///
    /// Returns `None` when no server address is set. Any other address is
    /// taken as is; whether it is reachable is decided by the first request.
    pub fn from_settings(settings: &ConnectionSettings) -> Option<Self> {
        let raw = settings.server_url()?;

        Some(Self {
            server_address: normalize_server_address(raw).to_string(),
            workflow_id: settings.workflow_id.clone(),
            credential_mode: CredentialMode::from_settings(settings),
        })
    }

    /// Absolute server URL without a trailing slash.
    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    /// Opaque workflow identifier, passed through unmodified.
    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    pub fn credential_mode(&self) -> &CredentialMode {
        &self.credential_mode
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.server_address, path)
    }

    /// Parse the URL of `path` on this server.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Network`] if the result is not an absolute
    /// http(s) URL with a host. Such an address can never be reached.
    #[track_caller]
    pub fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        let raw = self.endpoint_url(path);

        let url = Url::parse(&raw)
            .map_err(|e| RequestError::unreachable_url(&raw, format!("invalid URL: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(RequestError::unreachable_url(
                &raw,
                "server address must be an http(s) URL with a host",
            ));
        }

        Ok(url)
    }
}

/// Strip exactly one trailing `/`.
pub fn normalize_server_address(address: &str) -> &str {
    address.strip_suffix('/').unwrap_or(address)
}

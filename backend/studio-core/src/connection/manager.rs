use crate::connection::config::ConnectionConfig;
use crate::connection::credentials::CredentialMode;
use crate::connection::identity::Identity;
use crate::connection::state::ConnectionState;
use crate::error::connection::{ConnectionError, RequestError};
use crate::settings::{ClientOptions, ConnectionSettings};
use crate::{IDENTITY_ENDPOINT, LOGIN_ENDPOINT};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use log::{debug, error, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use url::form_urlencoded;

const REMEMBER_ME_FIELD: &str = "_spring_security_remember_me";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Tracks the connection to a single capture/workflow server.
///
/// Reads go through [`state`](Self::state) and
/// [`current_identity`](Self::current_identity). All mutation happens in
/// `&mut self` methods, so one instance cannot be reconfigured from two
/// places at once; share it behind a lock if several tasks need it.
#[derive(Debug)]
pub struct ConnectionManager {
    client: Client,
    state: ConnectionState,
    config: Option<ConnectionConfig>,
    identity: Option<Identity>,
}

impl ConnectionManager {
    /// Create an unconfigured manager with default client options.
    pub fn new() -> Result<Self, ConnectionError> {
        Self::with_options(&ClientOptions::default())
    }

    pub fn with_options(options: &ClientOptions) -> Result<Self, ConnectionError> {
        Ok(Self {
            client: options.build_client()?,
            state: ConnectionState::Unconfigured,
            config: None,
            identity: None,
        })
    }

    /// Create a manager and apply `settings` once.
    pub async fn init(settings: &ConnectionSettings) -> Result<Self, ConnectionError> {
        let mut manager = Self::new()?;
        manager.configure(settings).await?;
        debug!("Initialized connection manager: {manager:?}");
        Ok(manager)
    }

    // ============================================
    // READ SURFACE
    // ============================================

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Identity from the last successful identity check.
    pub fn current_identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    pub fn server_address(&self) -> Option<&str> {
        self.config.as_ref().map(ConnectionConfig::server_address)
    }

    pub fn workflow_id(&self) -> Option<&str> {
        self.config.as_ref().and_then(ConnectionConfig::workflow_id)
    }

    pub fn credential_mode(&self) -> Option<&CredentialMode> {
        self.config.as_ref().map(ConnectionConfig::credential_mode)
    }

    /// The hosting environment is trusted to have authenticated the session.
    pub fn is_login_provided(&self) -> bool {
        self.credential_mode()
            .is_some_and(CredentialMode::is_implicit)
    }

    // ============================================
    // CONFIGURATION
    // ============================================

    /// Replace the configuration and verify the session against the server.
    ///
    /// Classified request failures are logged and swallowed; [`state`](Self::state)
    /// already reflects them. An address that is not an http(s) URL ends up as
    /// [`ConnectionState::NetworkError`] like any other unreachable server.
    pub async fn configure(&mut self, settings: &ConnectionSettings) -> Result<(), ConnectionError> {
        let Some(config) = ConnectionConfig::from_settings(settings) else {
            info!("No server address configured, connection is unconfigured");
            self.config = None;
            self.identity = None;
            self.state = ConnectionState::Unconfigured;
            return Ok(());
        };

        info!(
            "Configuring connection to {} ({})",
            config.server_address(),
            config.credential_mode().describe()
        );
        self.config = Some(config);

        match self.refresh_identity().await {
            Ok(()) => Ok(()),
            Err(ConnectionError::Request(e)) => {
                error!("Connection check failed ({}): {}", self.state, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Log in if explicit credentials are configured, then ask the server who
    /// this session belongs to and derive the state from the answer.
    ///
    /// # Errors
    ///
    /// Classified failures are returned as [`ConnectionError::Request`] with the
    /// matching error state already recorded. Returns
    /// [`ConnectionError::NotConfigured`] without touching the state when no
    /// server address is set.
    pub async fn refresh_identity(&mut self) -> Result<(), ConnectionError> {
        let credentials = self.credential_mode().cloned().unwrap_or_default();

        if credentials.is_explicit() {
            self.login().await?;
        }

        let identity: Identity = self.json_request(IDENTITY_ENDPOINT).await?;
        debug!("Identity check returned: {identity:?}");

        self.state = ConnectionState::from_identity(&identity, &credentials);
        info!(
            "Connection state is now {} (user '{}')",
            self.state,
            identity.username()
        );
        self.identity = Some(identity);

        Ok(())
    }

    // ============================================
    // REQUESTS
    // ============================================

    /// Submit the explicit credentials to the login endpoint.
    ///
    /// The response body is ignored. A successful exchange does not mean the
    /// credentials were accepted; only the following identity check tells.
    /// Does nothing unless explicit credentials are configured.
    pub async fn login(&mut self) -> Result<(), ConnectionError> {
        let Some(CredentialMode::Explicit { username, password }) = self.credential_mode().cloned()
        else {
            debug!("No explicit credentials configured, skipping login");
            return Ok(());
        };

        debug!("Logging in as '{username}'");
        let form = [
            ("j_username", username.as_str()),
            ("j_password", password.expose()),
            (REMEMBER_ME_FIELD, "on"),
        ];

        self.request(Method::POST, LOGIN_ENDPOINT, Some(&form[..]))
            .await
            .map(|_| ())
    }

    /// GET `path` and parse the body as JSON.
    ///
    /// A body that cannot be read or parsed moves the state to
    /// [`ConnectionState::InvalidResponse`].
    pub(crate) async fn json_request<T: DeserializeOwned>(
        &mut self,
        path: &str,
    ) -> Result<T, ConnectionError> {
        let response = self.request(Method::GET, path, None).await?;
        let url = response.url().to_string();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let error = RequestError::invalid_response(&url, e.to_string());
                return Err(self.record_failure(error));
            }
        };

        serde_json::from_slice(&body)
            .map_err(|e| self.record_failure(RequestError::invalid_response(&url, e.to_string())))
    }

    /// Send one request to the configured server.
    ///
    /// Cookies from earlier responses are sent along and redirects are not
    /// followed. Transport failures move the state to
    /// [`ConnectionState::NetworkError`], responses outside 2xx/3xx to
    /// [`ConnectionState::ResponseNotOk`]. Anything else is returned as is and
    /// the state is left alone.
    pub(crate) async fn request(
        &mut self,
        method: Method,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Response, ConnectionError> {
        let Some(config) = &self.config else {
            return Err(ConnectionError::NotConfigured {
                message: format!("Cannot request '{path}' without a server address"),
                location: ErrorLocation::from(Location::caller()),
            });
        };
        let url = config.endpoint_url(path);
        let target = match config.endpoint(path) {
            Ok(target) => target,
            Err(e) => return Err(self.record_failure(e)),
        };
        debug!("{method} {target}");

        let mut request = self.client.request(method, target.as_str());
        if let Some(fields) = form {
            let mut body = form_urlencoded::Serializer::new(String::new());
            for (name, value) in fields {
                body.append_pair(name, value);
            }
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.finish());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.record_failure(RequestError::network(&url, &e))),
        };

        let status = response.status();
        if !HttpStatusCode(status.as_u16()).is_accepted() {
            return Err(self.record_failure(RequestError::response_not_ok(&url, status)));
        }

        Ok(response)
    }

    fn record_failure(&mut self, error: RequestError) -> ConnectionError {
        self.state = error.state();
        ConnectionError::Request(error)
    }
}

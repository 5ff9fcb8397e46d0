use crate::settings::ConnectionSettings;

use common::RedactedSecret;

/// How the manager proves its identity to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialMode {
    /// No credentials configured.
    #[default]
    None,
    /// The hosting environment already authenticated the session; cookies
    /// are present out-of-band.
    Implicit,
    /// Credentials submitted through the login endpoint.
    Explicit {
        username: String,
        password: RedactedSecret,
    },
}

impl CredentialMode {
    /// `Implicit` wins over a username/password pair; a pair with either half
    /// empty counts as no credentials.
    pub fn from_settings(settings: &ConnectionSettings) -> Self {
        if settings.login_provided {
            return Self::Implicit;
        }

        match (&settings.login_name, &settings.login_password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Self::Explicit {
                    username: username.clone(),
                    password: password.clone(),
                }
            }
            _ => Self::None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit)
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit { .. })
    }

    /// Log-safe description.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::None => "no login",
            Self::Implicit => "login provided by host",
            Self::Explicit { .. } => "username and password",
        }
    }
}

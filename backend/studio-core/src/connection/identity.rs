use crate::ANONYMOUS_USERNAME;

use serde::Deserialize;

/// Response of the identity endpoint.
///
/// Only `user.username` is required; everything else is read when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub user: UserInfo,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub org: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// The server does not consider this session authenticated.
    pub fn is_anonymous(&self) -> bool {
        self.user.username == ANONYMOUS_USERNAME
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

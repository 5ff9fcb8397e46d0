pub mod connection;
pub mod error;
pub mod settings;

#[cfg(test)]
mod tests;

pub use connection::{
    ConnectionConfig, ConnectionManager, ConnectionState, CredentialMode, Identity,
};
pub use settings::{ClientOptions, ConnectionSettings};

/// Server-relative form login endpoint (Spring Security).
pub const LOGIN_ENDPOINT: &str = "admin_ng/j_spring_security_check";
/// Server-relative identity check endpoint.
pub const IDENTITY_ENDPOINT: &str = "info/me.json";
/// Username the identity endpoint reports for an unauthenticated session.
pub const ANONYMOUS_USERNAME: &str = "anonymous";

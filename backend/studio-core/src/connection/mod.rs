//! Connection to a capture/workflow server.
//!
//! [`ConnectionManager`] owns the one active [`ConnectionConfig`], verifies the
//! session against the identity endpoint and reduces every outcome to a single
//! [`ConnectionState`].

pub mod config;
pub mod credentials;
pub mod identity;
pub mod manager;
pub mod state;

pub use config::ConnectionConfig;
pub use credentials::CredentialMode;
pub use identity::{Identity, Organization, UserInfo};
pub use manager::ConnectionManager;
pub use state::ConnectionState;

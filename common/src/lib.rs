//! Shared primitives for the studio workspace.
//!
//! Everything here is plain data with no I/O:
//!
//! - **ErrorLocation**: call-site tracking carried by every error variant
//! - **HttpStatusCode**: status classification used when a server response is rejected
//! - **RedactedSecret**: password wrapper that never shows up in logs
//!
//! The connection logic itself lives in `studio-core`.

pub mod error;
pub mod http_status;
pub mod redacted_secret;


pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;

pub mod connection;
pub mod settings;

pub use connection::{ConnectionError, RequestError};
pub use settings::SettingsError;

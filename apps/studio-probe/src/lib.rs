// Library exports for testing
// The binary (main.rs) imports these as well

pub mod env_settings;
pub mod error;
pub mod logger;
pub mod probe;
pub mod status;

#[cfg(test)]
mod tests;

use crate::env_settings::ProbeSettings;
use crate::error::ProbeError;
use crate::status::{StatusReport, status_report};

use common::ErrorLocation;

use studio_core::ConnectionManager;

use std::panic::Location;

use log::info;

/// Result of one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub report: StatusReport,
    pub username: Option<String>,
    pub server_address: Option<String>,
}

/// Configure a fresh connection manager once and report the result.
///
/// # Errors
///
/// Only unclassified failures are returned, such as an HTTP client that
/// cannot be built. Network and server problems end up in the report.
pub async fn run(settings: &ProbeSettings) -> Result<ProbeOutcome, ProbeError> {
    let mut manager = ConnectionManager::with_options(&settings.client).map_err(core_error)?;
    manager
        .configure(&settings.connection)
        .await
        .map_err(core_error)?;

    let report = status_report(manager.state(), manager.is_login_provided());
    info!("Probe finished in state {}: {}", report.state, report.message);

    Ok(ProbeOutcome {
        report,
        username: manager.current_identity().map(|i| i.username().to_string()),
        server_address: manager.server_address().map(str::to_string),
    })
}

#[track_caller]
fn core_error(error: studio_core::error::ConnectionError) -> ProbeError {
    ProbeError::Core {
        message: error.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

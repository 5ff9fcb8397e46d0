use studio_probe::env_settings::{LOG_DIR_VAR, LOG_LEVEL_VAR, ProbeSettings, load_dotenv};
use studio_probe::error::ProbeError;
use studio_probe::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize, parse_level};
use studio_probe::probe;

use common::ErrorLocation;

use std::env;
use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

async fn run() -> Result<bool, ProbeError> {
    let dotenv_path = load_dotenv();

    let log_dir = env::var(LOG_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("studio-probe"));
    create_dir_all(&log_dir).map_err(|e| ProbeError::Logger {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let level = env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|name| parse_level(&name))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    LoggerInitialize(&log_dir, level)?;

    info!("Log directory: {}", log_dir.display());
    if let Some(path) = dotenv_path {
        info!("Loaded .env from: {}", path.display());
    }

    let settings = ProbeSettings::from_env()?;
    let outcome = probe::run(&settings).await?;

    println!("{}: {}", outcome.report.state, outcome.report.message);
    if let Some(username) = &outcome.username {
        println!("user: {username}");
    }

    Ok(outcome.report.usable)
}

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "weather_tui=info,weather_core=info";

/// Route `tracing` output to a file; the terminal belongs to the window.
///
/// The filter comes from `RUST_LOG` when set. Returns the log file path.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(path)
}

fn default_log_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "weather-task", "weather")
        .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

    Ok(dirs.data_local_dir().join("weather.log"))
}

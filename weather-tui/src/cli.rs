use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use weather_core::{Config, provider_from_config};

use crate::logging;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city, in a terminal window")]
pub struct Cli {
    /// City to pre-fill in the input field.
    #[arg(long, short)]
    pub city: Option<String>,

    /// Read configuration from this file instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the platform data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let log_path = logging::init(self.log_file)?;

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        }
        .apply_env();

        let provider = provider_from_config(&config)?;
        info!(log = %log_path.display(), timeout = ?config.timeout(), "starting weather viewer");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let _guard = runtime.enter();
        weather_tui::app::run(provider, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "weather",
            "--city",
            "Paris",
            "--config",
            "/tmp/weather.toml",
            "--log-file",
            "/tmp/weather.log",
        ])
        .unwrap();

        assert_eq!(cli.city.as_deref(), Some("Paris"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/weather.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/weather.log")));
    }

    #[test]
    fn flags_are_optional() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.city.is_none() && cli.config.is_none() && cli.log_file.is_none());
    }
}

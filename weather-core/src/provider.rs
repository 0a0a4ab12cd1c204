use crate::{
    Config, IconFailure, IconImage, QueryFailure, WeatherReport,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A source of current conditions and their icons.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for `city`, as named by the user.
    async fn current(&self, city: &str) -> Result<WeatherReport, QueryFailure>;

    /// The bitmap behind an icon key from [`WeatherReport::icon`].
    async fn icon(&self, icon: &str) -> Result<IconImage, IconFailure>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::new(api_key.to_owned(), config)?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Config::default()
        };

        assert!(provider_from_config(&cfg).is_ok());
    }
}

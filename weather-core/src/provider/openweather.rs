use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    Config, IconFailure, IconImage, QueryFailure, WeatherReport, error::QueryCause,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    icon_base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            api_key,
            base_url: config.openweather.base_url.trim_end_matches('/').to_string(),
            icon_base_url: config
                .openweather
                .icon_base_url
                .trim_end_matches('/')
                .to_string(),
            http,
        })
    }

    pub fn weather_url(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }

    pub fn icon_url(&self, icon: &str) -> String {
        format!("{}/img/w/{icon}.png", self.icon_base_url)
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, QueryCause> {
        let res = self
            .http
            .get(self.weather_url())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            return Err(QueryCause::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        WeatherReport::try_from(parsed)
    }

    async fn fetch_icon(&self, icon: &str) -> Result<IconImage, IconFailure> {
        let transport = |source: reqwest::Error| IconFailure::Transport {
            icon: icon.to_string(),
            source: source.without_url(),
        };

        let res = self
            .http
            .get(self.icon_url(icon))
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(IconFailure::Status {
                icon: icon.to_string(),
                status,
            });
        }

        let bytes = res.bytes().await.map_err(transport)?;
        IconImage::decode(&bytes).map_err(|source| IconFailure::Decode {
            icon: icon.to_string(),
            source,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lon: f64,
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    coord: OwCoord,
    visibility: u32,
    timezone: i32,
}

impl TryFrom<OwCurrentResponse> for WeatherReport {
    type Error = QueryCause;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| QueryCause::Shape("empty `weather` array".to_string()))?;

        let utc_offset = FixedOffset::east_opt(parsed.timezone).ok_or_else(|| {
            QueryCause::Shape(format!("timezone offset {} out of range", parsed.timezone))
        })?;

        Ok(WeatherReport {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            temp_min_c: parsed.main.temp_min,
            temp_max_c: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
            wind_speed_mps: parsed.wind.speed,
            wind_deg: parsed.wind.deg,
            condition: condition.main,
            description: condition.description,
            longitude: parsed.coord.lon,
            latitude: parsed.coord.lat,
            utc_offset,
            sunrise: unix_to_utc(parsed.sys.sunrise)?,
            sunset: unix_to_utc(parsed.sys.sunset)?,
            icon: condition.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current(&self, city: &str) -> Result<WeatherReport, QueryFailure> {
        debug!("requesting current weather");
        self.fetch_current(city)
            .await
            .map_err(|cause| QueryFailure::new(city, cause))
    }

    #[instrument(skip(self))]
    async fn icon(&self, icon: &str) -> Result<IconImage, IconFailure> {
        debug!("requesting weather icon");
        self.fetch_icon(icon).await
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, QueryCause> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| QueryCause::Shape(format!("timestamp {ts} out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

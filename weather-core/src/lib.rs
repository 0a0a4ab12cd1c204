//! Core library for the `weather` viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and icon fetcher behind [`WeatherProvider`]
//! - Display formatting for a [`WeatherReport`]
//!
//! It is used by `weather-tui`, but has no knowledge of any UI.

pub mod config;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::{Config, OpenWeatherConfig};
pub use error::{IconFailure, QueryFailure};
pub use format::{CompassDirection, DisplayFields};
pub use icon::IconImage;
pub use model::WeatherReport;
pub use provider::{WeatherProvider, provider_from_config};

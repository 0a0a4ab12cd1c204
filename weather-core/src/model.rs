use chrono::{DateTime, FixedOffset, Utc};

/// Current conditions for one city, built from a single API response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,

    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,

    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: u32,

    pub wind_speed_mps: f64,
    pub wind_deg: u16,

    /// Short condition group, e.g. "Clouds".
    pub condition: String,
    /// Longer text, e.g. "scattered clouds".
    pub description: String,

    pub longitude: f64,
    pub latitude: f64,

    /// Offset of the city's local time from UTC.
    pub utc_offset: FixedOffset,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,

    /// Opaque key for the icon service, e.g. "04d".
    pub icon: String,
}

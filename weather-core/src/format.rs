//! Turns a [`WeatherReport`] into the strings shown on screen.
//!
//! Everything here is pure; the current instant is passed in by the caller.

use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

use crate::model::WeatherReport;

const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Label used for wind speed; the service is queried with `units=metric`.
pub const WIND_SPEED_UNIT: &str = "m/s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    const ALL: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::NorthEast => "North-East",
            CompassDirection::East => "East",
            CompassDirection::SouthEast => "South-East",
            CompassDirection::South => "South",
            CompassDirection::SouthWest => "South-West",
            CompassDirection::West => "West",
            CompassDirection::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a bearing to one of eight 45° sectors centred on N, NE, E, ...
///
/// Equivalent to `floor((degrees + 22.5) / 45) mod 8`, computed in integers
/// so that a bearing on a sector edge always lands in the following sector.
pub fn compass_direction(degrees: u16) -> CompassDirection {
    let sector = (u32::from(degrees) * 2 + 45) / 90 % 8;
    CompassDirection::ALL[sector as usize]
}

/// Wall-clock time at `offset` for the instant `now`.
pub fn local_time(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset).format(CLOCK_FORMAT).to_string()
}

/// Wall-clock time of a sunrise or sunset, in the city's own offset.
pub fn sun_event_local_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format(CLOCK_FORMAT).to_string()
}

/// Renders a float the short way while keeping a trailing `.0` on whole numbers.
fn decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

pub fn celsius(value: f64) -> String {
    format!("{} °C", decimal(value))
}

pub fn percent(value: u8) -> String {
    format!("{value} %")
}

pub fn hectopascal(value: u32) -> String {
    format!("{value} hPa")
}

pub fn kilometres(metres: u32) -> String {
    format!("{} km", decimal(f64::from(metres) / 1000.0))
}

pub fn wind(speed: f64, degrees: u16) -> String {
    format!(
        "{} {WIND_SPEED_UNIT}, {}",
        decimal(speed),
        compass_direction(degrees)
    )
}

/// Text for every display region of the window except the icon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFields {
    pub city: String,
    pub country: String,
    pub weather: String,
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
    pub local_time: String,
    pub coordinates: String,
}

impl DisplayFields {
    pub fn from_report(report: &WeatherReport, now: DateTime<Utc>) -> Self {
        Self {
            city: format!("City : {}", report.city),
            country: format!("Country : {}", report.country),
            weather: format!("Weather : {} ({})", report.condition, report.description),
            temperature: format!("Temperature : {}", celsius(report.temperature_c)),
            feels_like: format!("Feels Like : {}", celsius(report.feels_like_c)),
            temp_min: format!("Min Temperature : {}", celsius(report.temp_min_c)),
            temp_max: format!("Max Temperature : {}", celsius(report.temp_max_c)),
            humidity: format!("Humidity : {}", percent(report.humidity_pct)),
            pressure: format!("Pressure : {}", hectopascal(report.pressure_hpa)),
            visibility: format!("Visibility : {}", kilometres(report.visibility_m)),
            wind: format!(
                "Wind Speed : {}",
                wind(report.wind_speed_mps, report.wind_deg)
            ),
            sunrise: format!(
                "Sunrise : {}",
                sun_event_local_time(report.sunrise, report.utc_offset)
            ),
            sunset: format!(
                "Sunset : {}",
                sun_event_local_time(report.sunset, report.utc_offset)
            ),
            local_time: format!("Local Time : {}", local_time(now, report.utc_offset)),
            coordinates: format!(
                "Coordinates : \n longitude : {}, latitude : {}",
                decimal(report.longitude),
                decimal(report.latitude)
            ),
        }
    }

    /// Every region blank except the temperature slot, which carries the message.
    pub fn not_found(city: &str) -> Self {
        Self {
            temperature: format!("Error: {city} not found\nPlease enter a valid city name!"),
            ..Self::default()
        }
    }

    pub fn regions(&self) -> [&str; 15] {
        [
            &self.city,
            &self.country,
            &self.weather,
            &self.temperature,
            &self.feels_like,
            &self.temp_min,
            &self.temp_max,
            &self.humidity,
            &self.pressure,
            &self.visibility,
            &self.wind,
            &self.sunrise,
            &self.sunset,
            &self.local_time,
            &self.coordinates,
        ]
    }
}

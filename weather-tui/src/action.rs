//! Actions: user intents and task results

use chrono::{DateTime, Utc};
use weather_core::{IconImage, WeatherReport};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Input =====
    /// Append a character to the city field
    InputChar(char),

    /// Remove the last character of the city field
    InputBackspace,

    /// Move focus between the field and the button
    FocusToggle,

    // ===== Weather =====
    /// Intent: query the weather for the text in the field
    Submit,

    /// Result: the query for `generation` succeeded
    WeatherDidLoad {
        generation: u64,
        report: WeatherReport,
        fetched_at: DateTime<Utc>,
    },

    /// Result: the query for `generation` failed
    WeatherDidError { generation: u64, city: String },

    // ===== Icon =====
    IconDidLoad { generation: u64, icon: IconImage },

    IconDidError { generation: u64 },

    /// Exit the application
    Quit,
}

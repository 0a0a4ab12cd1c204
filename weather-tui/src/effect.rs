//! Effects - side effects declared by the reducer, run as keyed tasks

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use tui_dispatch::TaskManager;
use weather_core::WeatherProvider;

use crate::action::Action;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Query current weather for the city as typed
    FetchWeather { generation: u64, city: String },
    /// Download the icon for a populated report
    FetchIcon { generation: u64, icon: String },
}

/// Handle effects by spawning tasks. Each task resolves to exactly one
/// [`Action`], which the task manager posts back to the UI loop.
///
/// Spawning under a key that is still running aborts the older task.
pub fn handle_effect(
    effect: Effect,
    tasks: &mut TaskManager<Action>,
    provider: &Arc<dyn WeatherProvider>,
) {
    let provider = Arc::clone(provider);
    match effect {
        Effect::FetchWeather { generation, city } => {
            tasks.spawn("weather", async move {
                match provider.current(&city).await {
                    Ok(report) => {
                        info!(city = %report.city, country = %report.country, "weather loaded");
                        Action::WeatherDidLoad {
                            generation,
                            report,
                            fetched_at: Utc::now(),
                        }
                    }
                    Err(err) => {
                        warn!(city = %err.city, cause = %err.cause, "weather query failed");
                        Action::WeatherDidError {
                            generation,
                            city: err.city,
                        }
                    }
                }
            });
        }
        Effect::FetchIcon { generation, icon } => {
            tasks.spawn("icon", async move {
                match provider.icon(&icon).await {
                    Ok(image) => Action::IconDidLoad {
                        generation,
                        icon: image,
                    },
                    Err(err) => {
                        warn!(error = %err, "error retrieving weather icon");
                        Action::IconDidError { generation }
                    }
                }
            });
        }
    }
}

//! Reducer - pure function: (state, action) -> DispatchResult

use tracing::debug;
use tui_dispatch::DispatchResult;
use weather_core::DisplayFields;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{Phase, ViewState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut ViewState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Input =====
        Action::InputChar(c) => {
            state.input.push(c);
            DispatchResult::changed()
        }

        Action::InputBackspace => {
            if state.input.pop().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::FocusToggle => {
            state.focus = state.focus.toggle();
            DispatchResult::changed()
        }

        // ===== Weather =====
        Action::Submit => {
            if state.is_loading() {
                debug!("update ignored, query already in flight");
                return DispatchResult::unchanged();
            }
            state.generation += 1;
            state.phase = Phase::Loading;
            DispatchResult::changed_with(Effect::FetchWeather {
                generation: state.generation,
                city: state.input.clone(),
            })
        }

        Action::WeatherDidLoad {
            generation,
            report,
            fetched_at,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.fields = DisplayFields::from_report(&report, fetched_at);
            state.phase = Phase::Populated;
            DispatchResult::changed_with(Effect::FetchIcon {
                generation,
                icon: report.icon,
            })
        }

        Action::WeatherDidError { generation, city } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.fields = DisplayFields::not_found(&city);
            state.icon = None;
            state.phase = Phase::Error;
            DispatchResult::changed()
        }

        // ===== Icon =====
        Action::IconDidLoad { generation, icon } => {
            if generation != state.generation || state.phase != Phase::Populated {
                return DispatchResult::unchanged();
            }
            state.icon = Some(icon);
            DispatchResult::changed()
        }

        // Leaves whatever icon is showing.
        Action::IconDidError { .. } => DispatchResult::unchanged(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

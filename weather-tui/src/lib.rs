//! Weather viewer window.
//!
//! The view is a small action/reducer state machine: key presses and task
//! results become [`action::Action`]s, [`reducer::reducer`] applies them to
//! [`state::ViewState`] inside a `tui_dispatch` effect store and returns
//! [`effect::Effect`]s, which run as keyed tasks on a tokio runtime and
//! report back with further actions.

pub mod action;
pub mod app;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod ui;

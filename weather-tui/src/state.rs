//! View state - everything the window needs to render

use weather_core::{DisplayFields, IconImage};

/// Where the current query cycle stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// A weather query is in flight; the update control is disabled.
    Loading,
    Populated,
    Error,
}

/// Which control receives key presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Button,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Input,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Contents of the city input field
    pub input: String,

    pub focus: Focus,

    pub phase: Phase,

    /// Text of every display region; swapped as a whole on each completed query
    pub fields: DisplayFields,

    /// Last successfully decoded icon
    pub icon: Option<IconImage>,

    /// Bumped on every accepted query; late results from older queries are dropped
    pub generation: u64,
}

impl ViewState {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

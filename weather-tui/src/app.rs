//! Terminal setup and the UI loop

use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::info;
use tui_dispatch::{EffectStore, TaskManager};
use weather_core::WeatherProvider;

use crate::action::Action;
use crate::effect::{Effect, handle_effect};
use crate::reducer::reducer;
use crate::state::ViewState;
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Open the window, run until the user quits, then restore the terminal.
///
/// Must be called from within a tokio runtime context; effects are spawned
/// onto it.
pub fn run(provider: Arc<dyn WeatherProvider>, initial_city: Option<String>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    install_panic_hook();

    let result = run_app(&mut terminal, provider, initial_city);

    let restored = restore_terminal().context("Failed to restore terminal");
    result?;
    restored
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let attempt = (|| -> io::Result<_> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    })();

    attempt.or_else(|err| {
        let _ = restore_terminal();
        Err(err).context("Failed to set up terminal")
    })
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, Show)
}

/// Put the terminal back before the default hook prints the panic message.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    provider: Arc<dyn WeatherProvider>,
    initial_city: Option<String>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(initial_city.unwrap_or_default(), provider, tx);

    info!("window opened");

    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|frame| ui::render(frame, frame.area(), app.state()))?;
            redraw = false;
        }

        while let Ok(action) = rx.try_recv() {
            redraw |= app.dispatch(action);
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match ui::handle_key(key, app.state()) {
                    Some(Action::Quit) => break,
                    Some(action) => redraw |= app.dispatch(action),
                    None => {}
                }
            }
            Event::Resize(..) => redraw = true,
            _ => {}
        }
    }

    info!("window closed");
    Ok(())
}

/// The store holding [`ViewState`], plus the task manager its effects run on.
pub struct App {
    store: EffectStore<ViewState, Action, Effect>,
    tasks: TaskManager<Action>,
    provider: Arc<dyn WeatherProvider>,
}

impl App {
    /// Task results are sent to `actions`; the caller feeds them back
    /// through [`App::dispatch`].
    pub fn new(
        initial_city: String,
        provider: Arc<dyn WeatherProvider>,
        actions: UnboundedSender<Action>,
    ) -> Self {
        Self {
            store: EffectStore::new(ViewState::with_input(initial_city), reducer),
            tasks: TaskManager::new(actions),
            provider,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    /// Apply an action and start any effects it asks for. Returns whether
    /// the window needs a redraw.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            handle_effect(effect, &mut self.tasks, &self.provider);
        }
        result.changed
    }
}

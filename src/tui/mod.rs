//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Layers are checked top-down; the first that applies owns the event:
//!
//! ```text
//! Ctrl+C ───────────────────────────────► quit, always
//! notice open     → Enter/Esc dismiss, everything else swallowed
//! prompt open     → command input; Enter submits to the prompt, Esc cancels
//! results open    → ↑↓ highlight; Enter opens highlighted/typed number; Esc closes
//! menu / document → ↑↓ PgUp/PgDn highlight or scroll; Enter runs the command
//!                   line (empty = open highlighted); Esc clears input or goes back
//! ```
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after an event. Idle polls
//! time out every 500ms; the repository status is re-probed on idle at most
//! every `REPO_REFRESH`.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{info, warn};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Command, Effect, PromptKind, parse_command, parse_index, update};
use crate::core::config::ResolvedConfig;
use crate::core::navigation::Screen;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::command_input::DEFAULT_TITLE;
use crate::tui::components::{
    CommandInput, DocumentState, InputEvent, MenuState, SearchResultsState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);
const REPO_REFRESH: Duration = Duration::from_secs(10);
const RESULTS_TITLE: &str = "Open which result number?";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input: CommandInput,
    /// Open prompt (None = the input is the command line)
    pub prompt: Option<PromptKind>,
    pub menu: MenuState,
    pub document: DocumentState,
    pub results: SearchResultsState,
    /// Screen the menu/document state was last built for.
    shown: Option<Screen>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input: CommandInput::new(),
            prompt: None,
            menu: MenuState::default(),
            document: DocumentState::default(),
            results: SearchResultsState::default(),
            shown: None,
        }
    }

    /// Bring presentation state in line with `app` after anything changed it.
    pub fn sync(&mut self, app: &App) {
        let screen = app.nav.current();
        if self.shown.as_ref() != Some(screen) {
            match screen {
                Screen::Menu { entries, .. } => self.menu.reset(entries.len()),
                Screen::Document { document, .. } => self.document.load(document),
            }
            self.shown = Some(screen.clone());
        }

        match &app.search_results {
            Some(results) => self.results.sync(results.len()),
            None => self.results.clear(),
        }

        self.input.title = match self.prompt {
            Some(kind) => kind.label().to_string(),
            None if app.search_results.is_some() => RESULTS_TITLE.to_string(),
            None => DEFAULT_TITLE.to_string(),
        };
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut app = App::new(config).map_err(io::Error::other)?;
    let mut tui = TuiState::new();
    tui.sync(&app);

    let mut terminal = ratatui::init();
    let guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    drop(guard);
    ratatui::restore();
    info!("notenav exiting");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, tui: &mut TuiState) -> io::Result<()> {
    let mut needs_redraw = true;
    let mut last_refresh = Instant::now();

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(IDLE_POLL)? else {
            if app.config.show_git_status && last_refresh.elapsed() >= REPO_REFRESH {
                app.refresh_repo_status();
                last_refresh = Instant::now();
                needs_redraw = true;
            }
            continue;
        };

        // Process first event + drain ALL pending events before next draw
        needs_redraw = true;
        let pending = std::iter::from_fn(|| drained(poll_event_immediate()));
        for event in std::iter::once(first_event).chain(pending) {
            if handle_event(app, tui, event) == Effect::Quit {
                return Ok(());
            }
        }
    }
}

/// A read error mid-drain ends the batch; the next blocking poll surfaces it again.
fn drained(polled: io::Result<Option<TuiEvent>>) -> Option<TuiEvent> {
    polled.unwrap_or_else(|e| {
        warn!("Stopped draining terminal events: {}", e);
        None
    })
}

/// Route one event through the overlay layers. See the module docs.
pub(crate) fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    if app.notice.is_some() {
        if matches!(event, TuiEvent::Submit | TuiEvent::Escape) {
            return dispatch(app, tui, Action::DismissNotice);
        }
        return Effect::None;
    }

    if let Some(kind) = tui.prompt {
        return handle_prompt_event(app, tui, kind, event);
    }

    if app.search_results.is_some() {
        return handle_results_event(app, tui, event);
    }

    handle_screen_event(app, tui, event)
}

fn handle_prompt_event(app: &mut App, tui: &mut TuiState, kind: PromptKind, event: TuiEvent) -> Effect {
    if event == TuiEvent::Escape {
        tui.prompt = None;
        tui.input.clear();
        tui.sync(app);
        return Effect::None;
    }
    match tui.input.handle_event(&event) {
        Some(InputEvent::Submit(text)) => {
            tui.prompt = None;
            dispatch(app, tui, kind.submit(text))
        }
        _ => Effect::None,
    }
}

fn handle_results_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event == TuiEvent::Escape {
        if !tui.input.is_empty() {
            tui.input.clear();
            return Effect::None;
        }
        return dispatch(app, tui, Action::DismissSearch);
    }
    if tui.results.handle_event(&event) {
        return Effect::None;
    }

    let Some(InputEvent::Submit(text)) = tui.input.handle_event(&event) else {
        return Effect::None;
    };
    let action = if text.trim().is_empty() {
        match tui.results.highlighted() {
            Some(n) => Action::OpenSearchResult(n),
            None => return Effect::None,
        }
    } else {
        match parse_index(&text) {
            Ok(n) => Action::OpenSearchResult(n),
            Err(e) => Action::Reject(e),
        }
    };
    dispatch(app, tui, action)
}

fn handle_screen_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let on_menu = matches!(app.nav.current(), Screen::Menu { .. });

    match event {
        TuiEvent::Escape => {
            if !tui.input.is_empty() {
                tui.input.clear();
                return Effect::None;
            }
            return dispatch(app, tui, Action::Back);
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::PageUp | TuiEvent::PageDown => {
            if on_menu {
                tui.menu.handle_event(&event);
            } else {
                tui.document.handle_event(&event);
            }
            return Effect::None;
        }
        _ => {}
    }

    let Some(InputEvent::Submit(text)) = tui.input.handle_event(&event) else {
        return Effect::None;
    };

    if text.trim().is_empty() {
        return match tui.menu.highlighted() {
            Some(n) if on_menu => dispatch(app, tui, Action::Select(n)),
            _ => Effect::None,
        };
    }

    match parse_command(&text, on_menu) {
        Ok(Command::Run(action)) => dispatch(app, tui, action),
        Ok(Command::Prompt(kind)) => {
            tui.prompt = Some(kind);
            tui.sync(app);
            Effect::None
        }
        Err(e) => dispatch(app, tui, Action::Reject(e)),
    }
}

fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let effect = update(app, action);
    tui.sync(app);
    effect
}

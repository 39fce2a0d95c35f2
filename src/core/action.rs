//! # Actions
//!
//! Everything that can happen in a notenav session becomes an `Action`.
//! User types `3` + Enter on a menu? That's `Action::Select(3)`.
//! User confirms a search prompt? That's `Action::Search(query)`.
//!
//! The `update()` function takes the current state and an action, applies
//! it, and returns an `Effect` telling the event loop what to do next.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! Folder listings and note reads happen inline: every read is a single
//! blocking attempt, and a failure becomes a `Notice` without touching the
//! navigator.

use log::{debug, info, warn};

use crate::core::calc::{evaluate, format_value};
use crate::core::error::{InputError, NotesError};
use crate::core::git::repo_status;
use crate::core::navigation::Navigator;
use crate::core::search::search;
use crate::core::state::{App, Notice};

pub const FOOTER_KEYS: &str =
    "Keys: [B] Back  [M] Main  [S] Search  [G] Git  [C] Calc  [H] Help  [Q] Quit";

pub const HELP_TEXT: &str = "\
- Type a number and press Enter to open a folder/note.
- Enter on an empty line opens the highlighted entry.
- B = back, M = main menu, Q = quit
- S = search notes
- G = git status (read-only)
- C = calculator
- Esc closes popups, or goes back when none are open.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Select(usize),
    Back,
    Main,
    Search(String),
    OpenSearchResult(usize),
    DismissSearch,
    Calculate(String),
    ShowHelp,
    ShowGitStatus,
    /// Surface an input problem the event loop detected itself.
    Reject(InputError),
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

/// Prompts that collect free text before producing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Calculate,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Search => "Search",
            PromptKind::Calculate => "Expression (e.g., (2+3)*4)",
        }
    }

    /// Turn the submitted text into the action this prompt stands for.
    pub fn submit(self, text: String) -> Action {
        match self {
            PromptKind::Search => Action::Search(text),
            PromptKind::Calculate => Action::Calculate(text),
        }
    }
}

/// What a line typed at the command input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Action),
    Prompt(PromptKind),
}

/// Parse a command line. Letters are case-insensitive; numbers only mean
/// something on a menu screen.
pub fn parse_command(raw: &str, on_menu: bool) -> Result<Command, InputError> {
    let input = raw.trim();
    let command = match input.to_uppercase().as_str() {
        "Q" => Command::Run(Action::Quit),
        "H" => Command::Run(Action::ShowHelp),
        "G" => Command::Run(Action::ShowGitStatus),
        "M" => Command::Run(Action::Main),
        "B" => Command::Run(Action::Back),
        "S" => Command::Prompt(PromptKind::Search),
        "C" => Command::Prompt(PromptKind::Calculate),
        _ if !on_menu => return Err(InputError::UnknownCommand(input.to_string())),
        _ => Command::Run(Action::Select(parse_index(input)?)),
    };
    Ok(command)
}

/// A 1-based choice. Range checking is left to whoever owns the list.
pub fn parse_index(raw: &str) -> Result<usize, InputError> {
    let input = raw.trim();
    input
        .parse::<usize>()
        .map_err(|_| InputError::NotANumber(input.to_string()))
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::Select(index) => {
            let next = app.nav.select(index);
            apply(app, next);
        }
        Action::Back => app.nav = app.nav.back(),
        Action::Main => {
            let next = app.nav.main();
            apply(app, next);
        }
        Action::Search(query) => run_search(app, query),
        Action::OpenSearchResult(index) => open_search_result(app, index),
        Action::DismissSearch => app.search_results = None,
        Action::Calculate(expr) => {
            let expr = expr.trim().to_string();
            let body = match evaluate(&expr) {
                Ok(value) => format!("{expr} = {}", format_value(value)),
                Err(e) => format!("Error: {e}"),
            };
            app.notice = Some(Notice::new("Calculator", body));
        }
        Action::ShowHelp => app.notice = Some(Notice::new("Help", HELP_TEXT)),
        Action::ShowGitStatus => {
            let status = repo_status(&app.config.repo_path);
            app.notice = Some(Notice::new("Git Status", status.details()));
            if app.config.show_git_status {
                app.repo_status = Some(status);
            }
        }
        Action::Reject(err) => report(app, &err.into()),
        Action::DismissNotice => app.notice = None,
        Action::Quit => {
            info!("Quit requested");
            return Effect::Quit;
        }
    }
    Effect::None
}

/// Adopt `next` on success; otherwise keep the current navigator and show why.
fn apply(app: &mut App, next: Result<Navigator, NotesError>) {
    match next {
        Ok(nav) => app.nav = nav,
        Err(e) => report(app, &e),
    }
}

fn report(app: &mut App, err: &NotesError) {
    warn!("{}", err);
    app.notice = Some(Notice::from(err));
}

fn run_search(app: &mut App, query: String) {
    let query = query.trim().to_string();
    if query.is_empty() {
        return;
    }
    match search(&app.config.notes_root, &query, app.config.search_limit) {
        Ok(results) if results.is_empty() => {
            app.search_results = None;
            app.notice = Some(Notice::new("Search", "No matches."));
        }
        Ok(results) => {
            app.search_results = Some(results);
            app.last_query = query;
        }
        Err(e) => report(app, &e),
    }
}

fn open_search_result(app: &mut App, index: usize) {
    let results = match app.search_results.as_deref() {
        Some(r) if !r.is_empty() => r,
        _ => return report(app, &InputError::NoResults.into()),
    };
    let Some(result) = index.checked_sub(1).and_then(|i| results.get(i)) else {
        let len = results.len();
        return report(app, &InputError::OutOfRange { index, len }.into());
    };

    let path = app.config.notes_root.join(&result.rel_path);
    let next = app.nav.open_document(&path);
    if next.is_ok() {
        app.search_results = None;
    }
    apply(app, next);
}

//! # Application State
//!
//! Core session state for notenav. Domain data only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── config: ResolvedConfig           // content root, search limit, git toggle
//! ├── nav: Navigator                   // current screen + back stack
//! ├── repo_status: Option<RepoStatus>  // title bar line (None = probing disabled)
//! ├── search_results: Option<Vec<…>>   // open results overlay
//! ├── last_query: String               // what produced search_results
//! └── notice: Option<Notice>           // help, git, calculator, errors
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::error::NotesError;
use crate::core::git::{RepoStatus, repo_status};
use crate::core::navigation::Navigator;
use crate::core::search::SearchResult;

/// A message box the user dismisses with Enter or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl From<&NotesError> for Notice {
    fn from(err: &NotesError) -> Self {
        Notice::new(err.heading(), err.to_string())
    }
}

pub struct App {
    pub config: ResolvedConfig,
    pub nav: Navigator,
    pub repo_status: Option<RepoStatus>,
    pub search_results: Option<Vec<SearchResult>>,
    pub last_query: String,
    pub notice: Option<Notice>,
}

impl App {
    /// Open the content root. Fails if the root can't be listed.
    pub fn new(config: ResolvedConfig) -> Result<Self, NotesError> {
        let nav = Navigator::open(&config.notes_root)?;
        let mut app = Self {
            config,
            nav,
            repo_status: None,
            search_results: None,
            last_query: String::new(),
            notice: None,
        };
        app.refresh_repo_status();
        Ok(app)
    }

    /// Re-probe the repository if status display is enabled.
    pub fn refresh_repo_status(&mut self) {
        self.repo_status = self
            .config
            .show_git_status
            .then(|| repo_status(&self.config.repo_path));
    }

    pub fn status_line(&self) -> String {
        self.repo_status
            .as_ref()
            .map(RepoStatus::summary)
            .unwrap_or_default()
    }
}

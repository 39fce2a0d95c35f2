//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: breadcrumb and repository status
//! - `NoticePopup`: help, git, calculator and error messages
//!
//! ### Stateful Components
//!
//! Persistent state in `TuiState`, transient wrapper built per frame:
//! - `MenuView` / `MenuState`: numbered folder listing with highlight
//! - `DocumentView` / `DocumentState`: rendered note in a scroll view
//! - `SearchResults` / `SearchResultsState`: results overlay
//! - `CommandInput`: the command line, also used for prompts
//!
//! Components receive external data as props rather than reaching into
//! `App`, which keeps each one testable against a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── menu.rs
//! ├── document_view.rs
//! ├── search_results.rs
//! ├── notice.rs
//! └── command_input.rs
//! ```

pub mod command_input;
pub mod document_view;
pub mod menu;
pub mod notice;
pub mod search_results;
mod title_bar;

pub use command_input::{CommandInput, InputEvent};
pub use document_view::{DocumentState, DocumentView};
pub use menu::{MenuState, MenuView};
pub use notice::NoticePopup;
pub use search_results::{SearchResults, SearchResultsState};
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

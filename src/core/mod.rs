//! # Core Application Logic
//!
//! This module contains notenav's content engine and session logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • content (listings)   │
//!                    │  • navigation (stack)   │
//!                    │  • search (index+rank)  │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │  reads only
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ notes tree │      │    git     │      │    TUI     │
//!     │ (.md, yml) │      │  (status)  │      │  Adapter   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`content`]: descriptors, folder listings, note reading
//! - [`navigation`]: `Navigator`: current screen, back stack, breadcrumb
//! - [`search`]: per-call index and ranking
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and `update()`

pub mod action;
pub mod calc;
pub mod config;
pub mod content;
pub mod error;
pub mod git;
pub mod navigation;
pub mod search;
pub mod state;

pub use error::{InputError, NotesError};

//! # Search
//!
//! `search()` = fresh `build_index()` + `rank()`, returning owned results so
//! the index can be dropped as soon as ranking is done.

pub mod index;
pub mod query;

use std::path::Path;

use log::info;

use crate::core::error::NotesError;

pub use index::{Document, build_index};
pub use query::{SearchHit, rank};

/// What the presentation layer needs to list and open a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub rel_path: String,
    pub score: u32,
}

pub fn search(root: &Path, query: &str, limit: usize) -> Result<Vec<SearchResult>, NotesError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let documents = build_index(root)?;
    let results: Vec<SearchResult> = rank(&documents, query, limit)
        .into_iter()
        .map(|hit| SearchResult {
            title: hit.document.title.clone(),
            rel_path: hit.document.rel_path.clone(),
            score: hit.score,
        })
        .collect();

    info!(
        "Search '{}': {} of {} documents matched",
        query.trim(),
        results.len(),
        documents.len()
    );
    Ok(results)
}

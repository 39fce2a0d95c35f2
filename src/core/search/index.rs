//! Full-tree document scan.
//!
//! Built from scratch on every search and dropped afterwards; there is no
//! on-disk index and no invalidation to get wrong.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::content::document::{file_stem, is_document};
use crate::core::content::infer_title;
use crate::core::error::NotesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `/`-separated path relative to the scanned root. Unique within one index.
    pub rel_path: String,
    pub title: String,
    pub body: String,
}

/// Scan every note under `root`, skipping anything beneath a dot-prefixed name.
pub fn build_index(root: &Path) -> Result<Vec<Document>, NotesError> {
    if !root.is_dir() {
        return Err(NotesError::NotFound(root.to_path_buf()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable path during indexing: {}", e);
                continue;
            }
        };
        if !is_note_file(&entry) {
            continue;
        }

        let bytes = match fs::read(entry.path()) {
            Ok(b) => b,
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let body = String::from_utf8_lossy(&bytes).into_owned();
        let title = infer_title(&body, &file_stem(entry.path()));
        documents.push(Document {
            rel_path: relative_path(root, entry.path()),
            title,
            body,
        });
    }

    debug!("Indexed {} documents under {}", documents.len(), root.display());
    Ok(documents)
}

/// Symlinked notes count; symlinked folders are not descended into.
fn is_note_file(entry: &DirEntry) -> bool {
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());
    is_file && is_document(entry.path())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

//! # Folder Listing
//!
//! Turns one folder on disk into the numbered entries of a menu screen.
//!
//! ```text
//! read_dir ──► keep dirs (no leading '.') + *.md
//!          ──► drop names in `hidden`
//!          ──► folders A-Z, then notes A-Z
//!          ──► if `order`: (position in order, label), may interleave kinds
//! ```
//!
//! Nothing here is cached; every visit re-reads the folder and its descriptor.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::content::document::{file_stem, is_document};
use crate::core::content::metadata::{folder_name, load_metadata};
use crate::core::error::NotesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Document,
}

/// One visible child of a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub kind: EntryKind,
    pub path: PathBuf,
}

impl Entry {
    fn new(kind: EntryKind, path: PathBuf) -> Self {
        let raw = match kind {
            EntryKind::Folder => folder_name(&path),
            EntryKind::Document => file_stem(&path),
        };
        Self {
            label: pretty_name(&raw),
            kind,
            path,
        }
    }

    /// The on-disk file or folder name, as referenced by `order` and `hidden`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub title: String,
    pub entries: Vec<Entry>,
}

pub fn list_folder(folder: &Path) -> Result<FolderListing, NotesError> {
    let meta = load_metadata(folder)?;
    let title = meta
        .as_ref()
        .map(|m| m.title.clone())
        .unwrap_or_else(|| folder_name(folder));

    let read_dir = fs::read_dir(folder).map_err(|e| NotesError::from_io(folder, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| NotesError::from_io(folder, e))?;
        let path = dir_entry.path();
        let name = dir_entry.file_name().to_string_lossy().into_owned();

        let kind = if path.is_dir() {
            if name.starts_with('.') {
                continue;
            }
            EntryKind::Folder
        } else if path.is_file() && is_document(&path) {
            EntryKind::Document
        } else {
            continue;
        };

        if meta.as_ref().is_some_and(|m| m.hidden.contains(&name)) {
            continue;
        }
        entries.push(Entry::new(kind, path));
    }

    entries.sort_by(default_order);

    if let Some(order) = meta.as_ref().map(|m| &m.order).filter(|o| !o.is_empty()) {
        let position = |entry: &Entry| {
            let name = entry.file_name();
            order.iter().position(|o| *o == name).unwrap_or(usize::MAX)
        };
        entries.sort_by(|a, b| {
            position(a)
                .cmp(&position(b))
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        });
    }

    debug!("Listed {}: {} entries", folder.display(), entries.len());
    Ok(FolderListing { title, entries })
}

/// Folders before documents, each group by case-insensitive label.
fn default_order(a: &Entry, b: &Entry) -> Ordering {
    let rank = |e: &Entry| match e.kind {
        EntryKind::Folder => 0,
        EntryKind::Document => 1,
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
}

/// `john_the_ripper` → `John The Ripper`.
pub fn pretty_name(raw: &str) -> String {
    let spaced = raw.replace(['-', '_'], " ");
    title_case(spaced.trim())
}

/// Capitalize the first letter of every run of letters, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ContentFixture;

    fn labels(listing: &FolderListing) -> Vec<&str> {
        listing.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_pretty_name_examples() {
        assert_eq!(pretty_name("sql-injection"), "Sql Injection");
        assert_eq!(pretty_name("john_the_ripper"), "John The Ripper");
        assert_eq!(pretty_name("  _padded-  "), "Padded");
        assert_eq!(pretty_name("2fa"), "2Fa");
    }

    #[test]
    fn test_pretty_name_idempotent_on_pretty_label() {
        let once = pretty_name("Hash Cracking");
        assert_eq!(once, "Hash Cracking");
        assert_eq!(pretty_name(&once), once);
    }

    #[test]
    fn test_default_order_folders_first() {
        let fx = ContentFixture::new();
        fx.file("zeta.md", "# Z");
        fx.file("Alpha.md", "# A");
        fx.dir("web");
        fx.dir("Crypto");
        fx.file("notes.txt", "ignored");

        let listing = list_folder(fx.root()).unwrap();
        assert_eq!(labels(&listing), vec!["Crypto", "Web", "Alpha", "Zeta"]);
        assert_eq!(listing.entries[0].kind, EntryKind::Folder);
        assert_eq!(listing.entries[3].kind, EntryKind::Document);
    }

    #[test]
    fn test_dot_folders_skipped_and_extension_case_insensitive() {
        let fx = ContentFixture::new();
        fx.dir(".git");
        fx.file("README.MD", "hi");

        let listing = list_folder(fx.root()).unwrap();
        assert_eq!(labels(&listing), vec!["Readme"]);
    }

    #[test]
    fn test_title_defaults_to_folder_name() {
        let fx = ContentFixture::new();
        fx.dir("red-team");
        let listing = list_folder(&fx.path("red-team")).unwrap();
        assert_eq!(listing.title, "red-team");
        assert!(listing.entries.is_empty());
    }

    #[test]
    fn test_explicit_order_interleaves_kinds() {
        let fx = ContentFixture::new();
        fx.dir("tools");
        fx.dir("labs");
        fx.file("intro.md", "");
        fx.file("later.md", "");
        fx.file("_index.yml", "title: Home\norder: [intro.md, tools, missing.md]\n");

        let listing = list_folder(fx.root()).unwrap();
        assert_eq!(listing.title, "Home");
        // Listed entries in order, then the rest by label regardless of kind.
        assert_eq!(labels(&listing), vec!["Intro", "Tools", "Labs", "Later"]);
    }

    #[test]
    fn test_hidden_wins_over_order_and_aliases() {
        let fx = ContentFixture::new();
        fx.file("a.md", "");
        fx.file("secret.md", "");
        fx.file(
            "_index.yml",
            "order: [secret.md, a.md]\nhidden: [secret.md]\naliases:\n  secret.md: [s]\n",
        );

        let listing = list_folder(fx.root()).unwrap();
        assert_eq!(labels(&listing), vec!["A"]);
    }

    #[test]
    fn test_hidden_folder_excluded() {
        let fx = ContentFixture::new();
        fx.dir("drafts");
        fx.dir("public");
        fx.file("_index.yml", "hidden: [drafts]\n");
        let listing = list_folder(fx.root()).unwrap();
        assert_eq!(labels(&listing), vec!["Public"]);
    }

    #[test]
    fn test_missing_folder_is_not_found() {
        let fx = ContentFixture::new();
        let err = list_folder(&fx.path("nope")).unwrap_err();
        assert!(matches!(err, NotesError::NotFound(_)));
    }

    #[test]
    fn test_broken_descriptor_fails_listing() {
        let fx = ContentFixture::new();
        fx.file("_index.yml", "just a string");
        let err = list_folder(fx.root()).unwrap_err();
        assert!(matches!(err, NotesError::Configuration { .. }));
    }
}

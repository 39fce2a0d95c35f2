//! # Content
//!
//! Everything that reads the notes tree for display: per-folder descriptors,
//! folder listings, and individual notes.

pub mod document;
pub mod listing;
pub mod metadata;

pub use document::{infer_title, read_document};
pub use listing::{Entry, EntryKind, FolderListing, list_folder, pretty_name};
pub use metadata::{FolderMetadata, load_metadata};

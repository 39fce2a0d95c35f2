//! Reading markdown notes and inferring their titles.

use std::fs;
use std::path::Path;

use crate::core::error::NotesError;

/// Extension (without the dot) that marks a file as a note. Compared case-insensitively.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Read a note as text. Invalid UTF-8 is replaced with U+FFFD instead of failing.
pub fn read_document(path: &Path) -> Result<String, NotesError> {
    let bytes = fs::read(path).map_err(|e| NotesError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// First `# ` heading line, trimmed; otherwise `fallback`.
pub fn infer_title(text: &str, fallback: &str) -> String {
    text.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// File name without extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn is_document(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

//! Per-folder display descriptor (`_index.yml`).
//!
//! ```yaml
//! title: Web Security
//! order: [xss.md, sqli.md]
//! hidden: [draft.md]
//! aliases:
//!   sqli.md: [sql injection]
//! ```
//!
//! Every key is optional. A descriptor that exists but has the wrong shape is
//! an error rather than a silent default, so authoring mistakes surface.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::core::error::NotesError;

pub const DESCRIPTOR_FILE: &str = "_index.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMetadata {
    pub title: String,
    pub order: Vec<String>,
    pub hidden: BTreeSet<String>,
    /// Parsed and validated, not consulted by listing or search yet.
    pub aliases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDescriptor {
    title: Option<String>,
    #[serde(default)]
    order: Vec<String>,
    #[serde(default)]
    hidden: Vec<String>,
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
}

/// Load the descriptor for `folder`, or `None` if the folder has none.
pub fn load_metadata(folder: &Path) -> Result<Option<FolderMetadata>, NotesError> {
    let path = folder.join(DESCRIPTOR_FILE);
    let contents = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(NotesError::from_io(&path, e)),
    };
    let meta = parse_descriptor(&contents, folder)?;
    debug!(
        "Loaded descriptor for {} ({} ordered, {} hidden)",
        folder.display(),
        meta.order.len(),
        meta.hidden.len()
    );
    Ok(Some(meta))
}

/// Validate descriptor text into `FolderMetadata`, filling defaults from `folder`.
pub fn parse_descriptor(contents: &str, folder: &Path) -> Result<FolderMetadata, NotesError> {
    let invalid = |message: String| NotesError::Configuration {
        folder: folder.to_path_buf(),
        message,
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| invalid(e.to_string()))?;

    let raw = match value {
        // An empty file parses as null: valid, all defaults.
        serde_yaml::Value::Null => RawDescriptor::default(),
        serde_yaml::Value::Mapping(_) => {
            serde_yaml::from_value(value).map_err(|e| invalid(e.to_string()))?
        }
        _ => return Err(invalid("descriptor must be a mapping".to_string())),
    };

    Ok(FolderMetadata {
        title: raw.title.unwrap_or_else(|| folder_name(folder)),
        order: raw.order,
        hidden: raw.hidden.into_iter().collect(),
        aliases: raw.aliases,
    })
}

/// The folder's own base name, used when no title is given.
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

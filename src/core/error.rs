//! # Errors
//!
//! One error type for everything the content engine can report.
//!
//! ```text
//! NotesError
//! ├── Configuration   // malformed `_index.yml`, names the folder
//! ├── NotFound        // folder/document/root does not exist
//! ├── Io              // anything else the filesystem refused
//! └── Input           // user typed something we can't act on
//! ```
//!
//! None of these are fatal to the session. The reducer turns them into a
//! notice and leaves navigation state exactly where it was.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("invalid folder descriptor in {}: {message}", folder.display())]
    Configuration { folder: PathBuf, message: String },

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

impl NotesError {
    /// Map an `io::Error` for `path`, keeping "missing" distinct from other failures.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            NotesError::NotFound(path.to_path_buf())
        } else {
            NotesError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Short heading used when the error is shown as a notice.
    pub fn heading(&self) -> &'static str {
        match self {
            NotesError::Configuration { .. } => "Configuration",
            NotesError::NotFound(_) => "Not Found",
            NotesError::Io { .. } => "Read Error",
            NotesError::Input(_) => "Input",
        }
    }
}

/// Problems with what the user typed. Never changes any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Number out of range: {index} (choose 1-{len}).")]
    OutOfRange { index: usize, len: usize },

    #[error("Invalid choice '{0}'. Use a number or one of the keys in the legend.")]
    NotANumber(String),

    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    #[error("Numbers select menu entries; this screen is a note.")]
    NotAMenu,

    #[error("There are no search results to open.")]
    NoResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = NotesError::from_io(
            Path::new("/nope"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, NotesError::NotFound(p) if p == Path::new("/nope")));
    }

    #[test]
    fn test_from_io_keeps_other_kinds() {
        let err = NotesError::from_io(
            Path::new("/locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, NotesError::Io { .. }));
        assert!(err.to_string().contains("/locked"));
    }

    #[test]
    fn test_configuration_error_names_folder() {
        let err = NotesError::Configuration {
            folder: PathBuf::from("notes/web"),
            message: "expected a mapping".into(),
        };
        assert!(err.to_string().contains("notes/web"));
        assert_eq!(err.heading(), "Configuration");
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err: NotesError = InputError::OutOfRange { index: 4, len: 3 }.into();
        assert_eq!(err.to_string(), "Number out of range: 4 (choose 1-3).");
    }
}

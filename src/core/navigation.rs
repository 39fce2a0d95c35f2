//! # Navigation
//!
//! The menu/note state machine with its back stack.
//!
//! ```text
//!            select(folder)              select(note) / open_document
//!   ┌──────┐ ─────────────► ┌──────┐ ──────────────────────────────► ┌──────────┐
//!   │ Menu │                │ Menu │                                 │ Document │
//!   └──────┘ ◄───────────── └──────┘ ◄────────────────────────────── └──────────┘
//!                 back                            back
//!
//!   main: clear stack, current = root menu (re-listed)
//! ```
//!
//! A `Navigator` is a value. Every transition borrows the current navigator
//! and returns a new one, so a failed transition simply leaves the caller
//! holding the old state.

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::content::document::file_stem;
use crate::core::content::{Entry, EntryKind, infer_title, list_folder, read_document};
use crate::core::error::{InputError, NotesError};

pub const BREADCRUMB_ROOT: &str = "Main";
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// One navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu {
        title: String,
        folder: PathBuf,
        entries: Vec<Entry>,
    },
    Document {
        title: String,
        folder: PathBuf,
        document: PathBuf,
    },
}

impl Screen {
    /// Build a fresh menu screen by listing `folder`.
    pub fn menu(folder: &Path) -> Result<Self, NotesError> {
        let listing = list_folder(folder)?;
        Ok(Screen::Menu {
            title: listing.title,
            folder: folder.to_path_buf(),
            entries: listing.entries,
        })
    }

    /// Build a document screen, reading the note to infer its title.
    pub fn document(path: &Path) -> Result<Self, NotesError> {
        let text = read_document(path)?;
        Ok(Screen::Document {
            title: infer_title(&text, &file_stem(path)),
            folder: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            document: path.to_path_buf(),
        })
    }

    pub fn title(&self) -> &str {
        match self {
            Screen::Menu { title, .. } | Screen::Document { title, .. } => title,
        }
    }

    pub fn folder(&self) -> &Path {
        match self {
            Screen::Menu { folder, .. } | Screen::Document { folder, .. } => folder,
        }
    }

    /// Entries of a menu screen; empty for documents.
    pub fn entries(&self) -> &[Entry] {
        match self {
            Screen::Menu { entries, .. } => entries,
            Screen::Document { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    root: PathBuf,
    /// Oldest first. Never contains `current`.
    stack: Vec<Screen>,
    current: Screen,
}

impl Navigator {
    /// Start a session at the root folder's menu.
    pub fn open(root: &Path) -> Result<Self, NotesError> {
        Ok(Self {
            root: root.to_path_buf(),
            stack: Vec::new(),
            current: Screen::menu(root)?,
        })
    }

    pub fn current(&self) -> &Screen {
        &self.current
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Open the 1-based `index`-th entry of the current menu.
    pub fn select(&self, index: usize) -> Result<Self, NotesError> {
        let entries = match &self.current {
            Screen::Menu { entries, .. } => entries,
            Screen::Document { .. } => return Err(InputError::NotAMenu.into()),
        };
        let entry = index
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .ok_or(InputError::OutOfRange {
                index,
                len: entries.len(),
            })?;

        let next = match entry.kind {
            EntryKind::Folder => Screen::menu(&entry.path)?,
            EntryKind::Document => Screen::document(&entry.path)?,
        };
        debug!("Select {} -> {}", index, entry.path.display());
        Ok(self.push(next))
    }

    /// Return to the previous screen. No-op on an empty stack.
    pub fn back(&self) -> Self {
        let mut stack = self.stack.clone();
        match stack.pop() {
            Some(previous) => Self {
                root: self.root.clone(),
                stack,
                current: previous,
            },
            None => self.clone(),
        }
    }

    /// Drop all history and re-list the root folder.
    pub fn main(&self) -> Result<Self, NotesError> {
        Ok(Self {
            root: self.root.clone(),
            stack: Vec::new(),
            current: Screen::menu(&self.root)?,
        })
    }

    /// Jump straight to a note (e.g. a search result), keeping the current screen in history.
    pub fn open_document(&self, path: &Path) -> Result<Self, NotesError> {
        let next = Screen::document(path)?;
        Ok(self.push(next))
    }

    /// `Main > … > current`, with consecutive repeated titles shown once.
    pub fn breadcrumb(&self) -> String {
        breadcrumb(
            self.stack
                .iter()
                .map(Screen::title)
                .chain(std::iter::once(self.current.title())),
        )
    }

    fn push(&self, next: Screen) -> Self {
        let mut stack = self.stack.clone();
        stack.push(self.current.clone());
        Self {
            root: self.root.clone(),
            stack,
            current: next,
        }
    }
}

/// Join titles after the root label, collapsing consecutive duplicates.
pub fn breadcrumb<'a>(titles: impl IntoIterator<Item = &'a str>) -> String {
    let mut parts: Vec<&str> = vec![BREADCRUMB_ROOT];
    for title in titles {
        if parts.last() != Some(&title) {
            parts.push(title);
        }
    }
    parts.join(BREADCRUMB_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ContentFixture, security_notes};

    fn menu_titles(nav: &Navigator) -> Vec<&str> {
        nav.current().entries().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_open_starts_at_root_menu() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap();
        assert!(nav.stack().is_empty());
        assert_eq!(menu_titles(&nav), vec!["Crypto", "Web", "Welcome"]);
    }

    #[test]
    fn test_select_folder_pushes_menu() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap();
        let next = nav.select(2).unwrap();
        assert_eq!(next.stack().len(), 1);
        assert_eq!(next.stack()[0], *nav.current());
        assert_eq!(menu_titles(&next), vec!["Xss", "Sqli"]);
        // The original is untouched.
        assert!(nav.stack().is_empty());
    }

    #[test]
    fn test_select_document_infers_title() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap().select(3).unwrap();
        match nav.current() {
            Screen::Document {
                title,
                folder,
                document,
            } => {
                assert_eq!(title, "Welcome");
                assert_eq!(folder, fx.root());
                assert_eq!(document, &fx.path("welcome.md"));
            }
            other => panic!("expected document screen, got {other:?}"),
        }
    }

    #[test]
    fn test_document_title_falls_back_to_stem() {
        let fx = ContentFixture::new();
        fx.file("no-heading.md", "just text");
        let nav = Navigator::open(fx.root()).unwrap().select(1).unwrap();
        assert_eq!(nav.current().title(), "no-heading");
    }

    #[test]
    fn test_select_out_of_range_is_input_error() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap();
        for bad in [0, 4, 99] {
            let err = nav.select(bad).unwrap_err();
            assert!(matches!(
                err,
                NotesError::Input(InputError::OutOfRange { len: 3, .. })
            ));
        }
        assert!(nav.stack().is_empty());
        assert_eq!(menu_titles(&nav).len(), 3);
    }

    #[test]
    fn test_select_on_document_is_input_error() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap().select(3).unwrap();
        let err = nav.select(1).unwrap_err();
        assert!(matches!(err, NotesError::Input(InputError::NotAMenu)));
    }

    #[test]
    fn test_back_pops_and_is_noop_when_empty() {
        let fx = security_notes();
        let root = Navigator::open(fx.root()).unwrap();
        assert_eq!(root.back(), root);

        let deeper = root.select(1).unwrap().select(1).unwrap();
        assert_eq!(deeper.stack().len(), 2);
        let up = deeper.back();
        assert_eq!(up.current().title(), "Crypto");
        assert_eq!(up.back().current(), root.current());
    }

    #[test]
    fn test_main_clears_stack_and_relists_root() {
        let fx = security_notes();
        let deep = Navigator::open(fx.root())
            .unwrap()
            .select(2)
            .unwrap()
            .select(1)
            .unwrap();
        fx.file("zz-new.md", "# New");
        let home = deep.main().unwrap();
        assert!(home.stack().is_empty());
        assert_eq!(menu_titles(&home), vec!["Crypto", "Web", "Welcome", "Zz New"]);
    }

    #[test]
    fn test_open_document_pushes_current() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap();
        let opened = nav.open_document(&fx.path("crypto/rsa.md")).unwrap();
        assert_eq!(opened.stack().len(), 1);
        assert_eq!(opened.current().title(), "RSA");
        assert_eq!(opened.current().folder(), fx.path("crypto"));
    }

    #[test]
    fn test_open_missing_document_leaves_state() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root()).unwrap();
        let err = nav.open_document(&fx.path("gone.md")).unwrap_err();
        assert!(matches!(err, NotesError::NotFound(_)));
    }

    #[test]
    fn test_breadcrumb_collapses_consecutive_duplicates() {
        assert_eq!(
            breadcrumb(["Main", "Crypto", "Crypto", "RSA"]),
            "Main > Crypto > RSA"
        );
        assert_eq!(breadcrumb(["A", "B", "A"]), "Main > A > B > A");
    }

    #[test]
    fn test_navigator_breadcrumb() {
        let fx = security_notes();
        let nav = Navigator::open(fx.root())
            .unwrap()
            .select(1)
            .unwrap()
            .select(1)
            .unwrap();
        let root_title = crate::core::content::metadata::folder_name(fx.root());
        assert_eq!(
            nav.breadcrumb(),
            format!("Main > {root_title} > Crypto > RSA")
        );
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway notes tree. Deleted when dropped.
pub struct ContentFixture {
    dir: TempDir,
}

impl ContentFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Create a folder (and its parents) under the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("create fixture dir");
        path
    }

    /// Write a file under the root, creating parent folders as needed.
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }
}

/// The small security-notes tree most navigation tests walk through.
///
/// ```text
/// root/
/// ├── crypto/
/// │   ├── _index.yml   (title: Crypto)
/// │   └── rsa.md       (# RSA)
/// ├── web/
/// │   ├── _index.yml   (order: xss, sqli; hidden: draft)
/// │   ├── xss.md
/// │   ├── sqli.md
/// │   └── draft.md
/// └── welcome.md
/// ```
pub fn security_notes() -> ContentFixture {
    let fx = ContentFixture::new();
    fx.file("crypto/_index.yml", "title: Crypto\n");
    fx.file("crypto/rsa.md", "# RSA\nPublic key crypto.\n");
    fx.file(
        "web/_index.yml",
        "order: [xss.md, sqli.md]\nhidden: [draft.md]\n",
    );
    fx.file("web/xss.md", "# XSS\nOften confused with injection.\n");
    fx.file("web/sqli.md", "# SQL Injection\nUNION SELECT tricks.\n");
    fx.file("web/draft.md", "# Draft\nnot ready\n");
    fx.file("welcome.md", "# Welcome\nStart here.\n");
    fx
}

/// An `App` rooted at `fx` with git probing switched off.
pub fn test_app(fx: &ContentFixture) -> crate::core::state::App {
    let config = crate::core::config::ResolvedConfig {
        repo_path: fx.root().to_path_buf(),
        notes_root: fx.root().to_path_buf(),
        search_limit: 20,
        show_git_status: false,
    };
    crate::core::state::App::new(config).expect("open fixture root")
}

//! # Repository Status
//!
//! Read-only probe of the notes repository. Shells out to `git` and never
//! changes anything; a missing binary or a non-repository just yields
//! `ok: false` with the reason.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatus {
    pub ok: bool,
    pub path: PathBuf,
    pub branch: Option<String>,
    pub dirty: Option<bool>,
    pub head_short: Option<String>,
    pub message: String,
}

impl RepoStatus {
    fn failed(path: &Path, message: String) -> Self {
        Self {
            ok: false,
            path: path.to_path_buf(),
            branch: None,
            dirty: None,
            head_short: None,
            message,
        }
    }

    /// One-line summary for the title bar.
    pub fn summary(&self) -> String {
        if !self.ok {
            return format!("Repo: NOT OK ({})", self.path.display());
        }
        let parts: Vec<String> = [
            self.branch.clone(),
            self.dirty
                .map(|d| if d { "dirty" } else { "clean" }.to_string()),
            self.head_short.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        format!("Repo: {}", parts.join(" • "))
    }

    /// Multi-line report for the `G` view.
    pub fn details(&self) -> String {
        if !self.ok {
            return format!(
                "Could not open repo at {}\n{}",
                self.path.display(),
                self.message
            );
        }
        format!(
            "Path: {}\nBranch: {}\nDirty: {}\nHEAD: {}",
            self.path.display(),
            self.branch.as_deref().unwrap_or("-"),
            self.dirty.map_or("-".to_string(), |d| d.to_string()),
            self.head_short.as_deref().unwrap_or("(no commits)"),
        )
    }
}

/// Probe `path` with `git`. Never fails; problems are reported in the status.
pub fn repo_status(path: &Path) -> RepoStatus {
    if let Err(message) = git(path, &["rev-parse", "--git-dir"]) {
        debug!("Not a git repository at {}: {}", path.display(), message);
        return RepoStatus::failed(path, message);
    }

    let branch = match git(path, &["rev-parse", "--abbrev-ref", "HEAD"]) {
        Ok(b) if b == "HEAD" => "(detached)".to_string(),
        Ok(b) => b,
        // A fresh repository has no HEAD commit yet; fall back to the symbolic ref.
        Err(_) => git(path, &["symbolic-ref", "--short", "HEAD"])
            .unwrap_or_else(|_| "(unknown)".to_string()),
    };

    let dirty = match git(path, &["status", "--porcelain", "--untracked-files=all"]) {
        Ok(out) => Some(!out.is_empty()),
        Err(e) => {
            warn!("git status failed in {}: {}", path.display(), e);
            None
        }
    };

    let head_short = git(path, &["rev-parse", "--short", "HEAD"]).ok();

    RepoStatus {
        ok: true,
        path: path.to_path_buf(),
        branch: Some(branch),
        dirty,
        head_short,
        message: String::new(),
    }
}

/// Run `git -C <path> <args>`; trimmed stdout on success, stderr (or spawn error) otherwise.
fn git(path: &Path, args: &[&str]) -> Result<String, String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(args)
        .output()
        .map_err(|e| format!("failed to run git: {e}"))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_status() -> RepoStatus {
        RepoStatus {
            ok: true,
            path: PathBuf::from("/notes"),
            branch: Some("main".into()),
            dirty: Some(false),
            head_short: Some("abc1234".into()),
            message: String::new(),
        }
    }

    #[test]
    fn test_summary_ok() {
        assert_eq!(ok_status().summary(), "Repo: main • clean • abc1234");
    }

    #[test]
    fn test_summary_without_head() {
        let status = RepoStatus {
            dirty: Some(true),
            head_short: None,
            ..ok_status()
        };
        assert_eq!(status.summary(), "Repo: main • dirty");
    }

    #[test]
    fn test_summary_not_ok() {
        let status = RepoStatus::failed(Path::new("/x"), "nope".into());
        assert_eq!(status.summary(), "Repo: NOT OK (/x)");
        assert!(status.details().contains("nope"));
    }

    #[test]
    fn test_details_lists_fields() {
        let details = ok_status().details();
        assert!(details.contains("Branch: main"));
        assert!(details.contains("Dirty: false"));
        assert!(details.contains("HEAD: abc1234"));
    }

    #[test]
    fn test_plain_directory_is_not_ok() {
        let dir = tempfile::tempdir().unwrap();
        // The temp dir could sit inside someone's repository, so only check consistency.
        let status = repo_status(dir.path());
        if status.ok {
            assert!(status.branch.is_some());
        } else {
            assert!(status.summary().starts_with("Repo: NOT OK"));
        }
    }
}

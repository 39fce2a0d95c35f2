//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.notenav/config.toml` unless `--config` points
//! elsewhere. If the default file is missing on first run, a commented-out
//! template is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotenavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub repo_path: Option<String>,
    pub notes_root: Option<String>,
    pub search_limit: Option<usize>,
    pub show_git_status: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOTES_ROOT: &str = "notes";
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub repo_path: PathBuf,
    /// Absolute content root: `repo_path / notes_root`.
    pub notes_root: PathBuf,
    pub search_limit: usize,
    pub show_git_status: bool,
}

/// Values from CLI flags. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub repo_path: Option<PathBuf>,
    pub notes_root: Option<String>,
    pub search_limit: Option<usize>,
    pub no_git: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.notenav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".notenav").join("config.toml"))
}

/// Load config from `explicit` if given, else from the default location.
///
/// An explicit path must exist. A missing default file is generated from
/// the template and `NotenavConfig::default()` is returned.
pub fn load_config(explicit: Option<&Path>) -> Result<NotenavConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NotenavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NotenavConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<NotenavConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: NotenavConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# notenav configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# repo_path = "~/notes-repo"     # Or NOTENAV_REPO_PATH; defaults to the current directory
# notes_root = "notes"           # Folder inside repo_path holding the notes (NOTENAV_NOTES_ROOT)
# search_limit = 20              # Max search results shown (NOTENAV_SEARCH_LIMIT)
# show_git_status = true         # Probe the repo with `git` for the title bar
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NotenavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup, so tests don't touch process env.
pub fn resolve_with_env(
    config: &NotenavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Repo path: CLI → env → config → current directory
    let repo_path = cli
        .repo_path
        .clone()
        .or_else(|| env("NOTENAV_REPO_PATH").map(|s| expand_home(&s)))
        .or_else(|| config.general.repo_path.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from("."));

    // Notes root: CLI → env → config → default
    let notes_root = cli
        .notes_root
        .clone()
        .or_else(|| env("NOTENAV_NOTES_ROOT"))
        .or_else(|| config.general.notes_root.clone())
        .unwrap_or_else(|| DEFAULT_NOTES_ROOT.to_string());

    // Search limit: CLI → env (if it parses) → config → default
    let search_limit = cli
        .search_limit
        .or_else(|| {
            env("NOTENAV_SEARCH_LIMIT").and_then(|s| match s.trim().parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("Ignoring NOTENAV_SEARCH_LIMIT={:?}: not a number", s);
                    None
                }
            })
        })
        .or(config.general.search_limit)
        .unwrap_or(DEFAULT_SEARCH_LIMIT);

    let show_git_status = !cli.no_git && config.general.show_git_status.unwrap_or(true);

    let repo_path = absolutize(&repo_path);
    ResolvedConfig {
        notes_root: repo_path.join(notes_root),
        repo_path,
        search_limit,
        show_git_status,
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches(['/', '\\']));
    }
    PathBuf::from(raw)
}

fn absolutize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = NotenavConfig::default();
        assert!(config.general.repo_path.is_none());
        assert!(config.general.search_limit.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&NotenavConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.search_limit, DEFAULT_SEARCH_LIMIT);
        assert!(resolved.show_git_status);
        assert!(resolved.notes_root.ends_with(DEFAULT_NOTES_ROOT));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotenavConfig {
            general: GeneralConfig {
                repo_path: Some(dir.path().display().to_string()),
                notes_root: Some("kb".into()),
                search_limit: Some(5),
                show_git_status: Some(false),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        let repo = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(resolved.repo_path, repo);
        assert_eq!(resolved.notes_root, repo.join("kb"));
        assert_eq!(resolved.search_limit, 5);
        assert!(!resolved.show_git_status);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = NotenavConfig {
            general: GeneralConfig {
                notes_root: Some("from-config".into()),
                search_limit: Some(5),
                ..Default::default()
            },
        };
        let env = |key: &str| match key {
            "NOTENAV_NOTES_ROOT" => Some("from-env".to_string()),
            "NOTENAV_SEARCH_LIMIT" => Some("7".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert!(resolved.notes_root.ends_with("from-env"));
        assert_eq!(resolved.search_limit, 7);

        let cli = CliOverrides {
            notes_root: Some("from-cli".into()),
            search_limit: Some(3),
            no_git: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert!(resolved.notes_root.ends_with("from-cli"));
        assert_eq!(resolved.search_limit, 3);
        assert!(!resolved.show_git_status);
    }

    #[test]
    fn test_bad_env_limit_is_ignored() {
        let env = |key: &str| (key == "NOTENAV_SEARCH_LIMIT").then(|| "lots".to_string());
        let resolved = resolve_with_env(&NotenavConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.search_limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: NotenavConfig = toml::from_str("[general]\nnotes_root = \"kb\"\n").unwrap();
        assert_eq!(config.general.notes_root.as_deref(), Some("kb"));
        assert!(config.general.repo_path.is_none());

        let empty: NotenavConfig = toml::from_str("").unwrap();
        assert!(empty.general.notes_root.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nrepo_path = 1").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_generated_template_is_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path);
        let config = read_config(&path).unwrap();
        assert!(config.general.repo_path.is_none());
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/kb"), home.join("kb"));
        }
        assert_eq!(expand_home("/abs/kb"), PathBuf::from("/abs/kb"));
    }
}

//! config
//!
//! Settings loading and precedence.
//!
//! # Overview
//!
//! Toolgate has two configuration scopes:
//! - **Global**: user-level tool locations and command lists
//! - **Repo**: per-repository overrides
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global settings file
//! 3. Repo settings file
//!
//! # Global locations
//!
//! Searched in order:
//! 1. `$TOOLGATE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/toolgate/config.toml`
//! 3. `~/.toolgate/config.toml`
//!
//! # Repo location
//!
//! `.git/toolgate/config.toml` inside the repository's git directory.
//! Keeping it under `.git/` keeps per-repo tool paths out of the tree.
//!
//! Missing files are not errors; parse failures are.

pub mod schema;

pub use schema::{CommandsConfig, GuiToolConfig, Settings, ToolsConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{
    default_alternate_commands, default_extension_commands, default_ignore_commands,
    CatalogError, CommandCatalog,
};

/// Errors from settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid settings value: {0}")]
    InvalidValue(String),

    #[error("command list does not fit its id range: {0}")]
    Catalog(#[from] CatalogError),
}

/// A non-fatal observation made while loading settings.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading settings.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The merged settings.
    pub settings: Settings,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Environment variable overriding the global settings path.
pub const CONFIG_ENV: &str = "TOOLGATE_CONFIG";

/// Load settings from the default locations.
///
/// If `git_dir` is provided, also loads the per-repository file from
/// `<git_dir>/toolgate/config.toml`.
///
/// # Errors
///
/// Returns an error if a settings file exists but cannot be read or
/// parsed. Missing files are not an error; defaults apply.
pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
    let mut warnings = Vec::new();

    let mut settings = Settings::default();
    if let Some(path) = global_path() {
        if let Some(global) = read_settings(&path)? {
            settings = settings.merged_with(global);
        } else if std::env::var_os(CONFIG_ENV).is_some() {
            // An explicitly named file that does not exist is worth a note.
            warnings.push(ConfigWarning {
                message: format!("{CONFIG_ENV} points at a missing file"),
                path,
            });
        }
    }

    if let Some(git_dir) = git_dir {
        let path = repo_path(git_dir);
        if let Some(repo) = read_settings(&path)? {
            settings = settings.merged_with(repo);
        }
    }

    settings.validate()?;
    Ok(ConfigLoadResult { settings, warnings })
}

/// The global settings path, honoring `$TOOLGATE_CONFIG` and XDG.
///
/// Returns `None` only when no home directory can be determined.
pub fn global_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("toolgate").join("config.toml"));
        }
    }
    dirs::home_dir().map(|home| home.join(".toolgate").join("config.toml"))
}

/// The per-repository settings path inside a git directory.
pub fn repo_path(git_dir: &Path) -> PathBuf {
    git_dir.join("toolgate").join("config.toml")
}

/// Build the command catalog described by the settings: configured lists
/// where present, built-in defaults otherwise.
pub fn catalog_from(settings: &Settings) -> Result<CommandCatalog, ConfigError> {
    let extension = settings
        .commands
        .extension
        .clone()
        .unwrap_or_else(default_extension_commands);
    let alternate = settings
        .commands
        .alternate
        .clone()
        .unwrap_or_else(default_alternate_commands);
    let ignore = settings
        .commands
        .ignore
        .clone()
        .unwrap_or_else(default_ignore_commands);
    Ok(CommandCatalog::from_lists(extension, alternate, ignore)?)
}

/// Read and parse one settings file; `Ok(None)` when it does not exist.
fn read_settings(path: &Path) -> Result<Option<Settings>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    let settings = toml::from_str(&text).map_err(|err| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CommandGroup;

    fn write_file(dir: &Path, rel: &str, text: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn missing_repo_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_settings(&repo_path(dir.path())).unwrap();
        assert!(settings.is_none());
    }

    #[test]
    fn parse_error_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "toolgate/config.toml", "tools = 3");
        let err = read_settings(&path).expect_err("bad toml must fail");
        match err {
            ConfigError::ParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn repo_settings_override_global_shape() {
        let global: Settings = toml::from_str(
            "[tools]\ngit = \"/usr/bin/git\"\n[tools.alternate]\npath = \"/usr/bin/gitk\"",
        )
        .unwrap();
        let repo: Settings =
            toml::from_str("[tools.alternate]\npath = \"/opt/gui/gui\"\nexpand_commands = true")
                .unwrap();
        let merged = global.merged_with(repo);
        assert_eq!(merged.tools.git.as_deref(), Some("/usr/bin/git".as_ref()));
        assert_eq!(
            merged.tools.alternate.path.as_deref(),
            Some("/opt/gui/gui".as_ref())
        );
        assert!(merged.tools.alternate.expand_commands);
    }

    #[test]
    fn catalog_from_defaults_populates_all_groups() {
        let catalog = catalog_from(&Settings::default()).unwrap();
        assert!(!catalog.group(CommandGroup::ExtensionTool).is_empty());
        assert!(!catalog.group(CommandGroup::AlternateGui).is_empty());
        assert!(!catalog.group(CommandGroup::IgnoreEditor).is_empty());
    }

    #[test]
    fn configured_list_replaces_default() {
        let settings: Settings =
            toml::from_str("[[commands.extension]]\nname = \"Only\"\ncommand = \"only\"").unwrap();
        let catalog = catalog_from(&settings).unwrap();
        let ext = catalog.group(CommandGroup::ExtensionTool);
        assert_eq!(ext.len(), 1);
        assert_eq!(ext[0].name, "Only");
        // Other groups keep their defaults.
        assert!(!catalog.group(CommandGroup::AlternateGui).is_empty());
    }

    #[test]
    fn repo_path_is_inside_git_dir() {
        let path = repo_path(Path::new("/work/repo/.git"));
        assert_eq!(
            path,
            Path::new("/work/repo/.git/toolgate/config.toml")
        );
    }
}

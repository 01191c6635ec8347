//! config::schema
//!
//! Serde schema for the settings files.
//!
//! Both the global and the per-repository file share one schema; the loader
//! merges them field by field with repo values winning.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::DynamicCommand;
use crate::config::ConfigError;

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// External tool locations and flags.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Dynamic command lists.
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Settings {
    /// Overlay `other` on top of `self`, field by field.
    ///
    /// Scalar tool fields are replaced when `other` sets them; a dynamic
    /// command list is replaced wholesale when `other` supplies one.
    pub fn merged_with(mut self, other: Settings) -> Settings {
        self.tools.merge_from(other.tools);
        self.commands.merge_from(other.commands);
        self
    }

    /// Validate settings values that serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(diff) = &self.tools.diff {
            if diff.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "tools.diff must not be blank; omit the key instead".into(),
                ));
            }
        }
        for (key, path) in [
            ("tools.git", &self.tools.git),
            ("tools.shell", &self.tools.shell),
            ("tools.editor", &self.tools.editor),
        ] {
            if let Some(path) = path {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidValue(format!(
                        "{key} must not be empty; omit the key instead"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Configured external tool locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Path to the git executable.
    pub git: Option<PathBuf>,

    /// Path to the interactive shell. When unset, derived from the git
    /// path (a `sh` binary next to `git`).
    pub shell: Option<PathBuf>,

    /// Diff tool command template. Supports `$LOCAL` and `$REMOTE`
    /// placeholders.
    pub diff: Option<String>,

    /// Editor used for ignore files. When unset, the platform opener is
    /// used.
    pub editor: Option<PathBuf>,

    /// Extension-tool GUI launcher.
    #[serde(default)]
    pub extension: GuiToolConfig,

    /// Alternate VCS GUI.
    #[serde(default)]
    pub alternate: GuiToolConfig,
}

impl ToolsConfig {
    fn merge_from(&mut self, other: ToolsConfig) {
        if other.git.is_some() {
            self.git = other.git;
        }
        if other.shell.is_some() {
            self.shell = other.shell;
        }
        if other.diff.is_some() {
            self.diff = other.diff;
        }
        if other.editor.is_some() {
            self.editor = other.editor;
        }
        self.extension.merge_from(other.extension);
        self.alternate.merge_from(other.alternate);
    }
}

/// A GUI tool that can either be launched as a single command or expanded
/// into its per-command dynamic list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuiToolConfig {
    /// Path to the tool executable. Unset means "not configured".
    pub path: Option<PathBuf>,

    /// When set, the single launch command is hidden and the tool's
    /// dynamic per-command list is exposed instead.
    #[serde(default)]
    pub expand_commands: bool,
}

impl GuiToolConfig {
    fn merge_from(&mut self, other: GuiToolConfig) {
        if other.path.is_some() {
            self.path = other.path;
            self.expand_commands = other.expand_commands;
        }
    }
}

/// Dynamic command list overrides.
///
/// A list that is present replaces the built-in default for that group;
/// an absent list keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
    /// Extension-tool entries.
    pub extension: Option<Vec<DynamicCommand>>,

    /// Alternate-GUI entries.
    pub alternate: Option<Vec<DynamicCommand>>,

    /// Ignore-editor entries.
    pub ignore: Option<Vec<DynamicCommand>>,
}

impl CommandsConfig {
    fn merge_from(&mut self, other: CommandsConfig) {
        if other.extension.is_some() {
            self.extension = other.extension;
        }
        if other.alternate.is_some() {
            self.alternate = other.alternate;
        }
        if other.ignore.is_some() {
            self.ignore = other.ignore;
        }
    }
}

//! tools
//!
//! Read-only snapshots of configured external tools.
//!
//! # Architecture
//!
//! The availability evaluator must be pure and cheap enough to run once per
//! command per idle tick, so filesystem existence checks happen here, once
//! per snapshot, instead of inside the evaluator. A [`ToolSnapshot`] is the
//! immutable view of the settings the evaluator and the invocation planner
//! consume; refreshing the settings produces a new snapshot, never a
//! mutation of an existing one.

use std::path::{Path, PathBuf};

use crate::config::ToolsConfig;

/// What is known about one configured tool at snapshot time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFacts {
    /// Configured executable path; `None` means "not configured".
    pub path: Option<PathBuf>,
    /// Whether the path pointed at an existing file when the snapshot was
    /// taken.
    pub exists: bool,
    /// Whether the tool's per-command list replaces its single launch
    /// command.
    pub expand_inline: bool,
}

impl ToolFacts {
    /// A tool that is configured and present on disk.
    pub fn usable(&self) -> bool {
        self.path.is_some() && self.exists
    }

    fn capture(path: Option<&Path>, expand_inline: bool) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            exists: path.is_some_and(|p| p.is_file()),
            expand_inline,
        }
    }
}

/// Immutable per-query view of every configured tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSnapshot {
    /// The git executable.
    pub git: ToolFacts,
    /// The interactive shell (configured, or derived from the git path).
    pub shell: ToolFacts,
    /// Diff tool command template with `$LOCAL`/`$REMOTE` placeholders.
    pub diff_template: Option<String>,
    /// Editor for ignore files.
    pub editor: ToolFacts,
    /// Extension-tool GUI.
    pub extension_gui: ToolFacts,
    /// Alternate VCS GUI.
    pub alternate_gui: ToolFacts,
}

impl ToolSnapshot {
    /// Capture a snapshot of the configured tools.
    ///
    /// Performs one existence check per configured path; this is the only
    /// I/O on the query path.
    pub fn capture(config: &ToolsConfig) -> Self {
        let shell_path = config
            .shell
            .clone()
            .or_else(|| config.git.as_deref().and_then(derive_shell_path));
        Self {
            git: ToolFacts::capture(config.git.as_deref(), false),
            shell: ToolFacts::capture(shell_path.as_deref(), false),
            diff_template: config.diff.clone(),
            editor: ToolFacts::capture(config.editor.as_deref(), false),
            extension_gui: ToolFacts::capture(
                config.extension.path.as_deref(),
                config.extension.expand_commands,
            ),
            alternate_gui: ToolFacts::capture(
                config.alternate.path.as_deref(),
                config.alternate.expand_commands,
            ),
        }
    }
}

/// Derive an interactive shell path from the git executable path: a binary
/// whose file name swaps the leading `git` for `sh`, next to `git` itself
/// (`/usr/bin/git` -> `/usr/bin/sh`, `git.exe` -> `sh.exe`).
pub fn derive_shell_path(git: &Path) -> Option<PathBuf> {
    let name = git.file_name()?.to_str()?;
    let shell_name = name.strip_prefix("git").map(|rest| format!("sh{rest}"))?;
    Some(git.with_file_name(shell_name))
}

//! provider
//!
//! The command provider facade a host embeds.
//!
//! # Architecture
//!
//! [`CommandProvider`] owns the command catalog and the tool configuration
//! and exposes the two host-facing operations:
//!
//! - [`CommandProvider::query_status`] - the availability query, answered
//!   by the pure evaluator in [`gate`]
//! - [`CommandProvider::invoke`] - resolve a command into an invocation
//!   and carry it out
//!
//! Invocation is split into a pure planning step
//! ([`CommandProvider::plan_invocation`]) and a dispatch step, so every
//! command's resolution can be tested without launching processes. The
//! planner is a flat id-to-behavior mapping over the resolved descriptor;
//! there is no handler object hierarchy.
//!
//! Commands whose effect lives in the host (tool windows, commit flows,
//! repository init) plan to a [`HostAction`] instead of a process launch;
//! the provider validates availability, the host performs the effect.
//!
//! # Defensive re-checks
//!
//! Availability said "enabled" at query time, but tools can vanish between
//! query and invocation. Planning re-checks every tool path it uses and
//! reports [`ProviderError::Configuration`] instead of attempting a doomed
//! launch.

pub mod gate;

pub use gate::{evaluate, root_menu_label, CommandStatus};

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{
    CommandCatalog, CommandGroup, CommandId, CommandScope, DynamicCommand, FixedCommand,
    Resolved,
};
use crate::config::ToolsConfig;
use crate::launch::{
    self, resolve_command, LaunchError, ResolveError, ResolvedInvocation,
};
use crate::repo::RepoState;
use crate::tools::{ToolFacts, ToolSnapshot};

/// Errors surfaced to the host. None are fatal; the provider stays usable
/// for the next invocation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The id is not handled by this provider.
    #[error("command {0} is not handled by this provider")]
    NotSupported(CommandId),

    /// A tool path is missing or invalid despite the command being offered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The command template could not be tokenized.
    #[error("command resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The operating system refused the launch.
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
}

/// Host-side effects the provider validates but does not perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Re-read repository status.
    Refresh,
    /// Show the history view.
    ShowHistory,
    /// Show the pending-changes view.
    ShowPendingChanges,
    /// Run the commit flow.
    Commit,
    /// Run the commit-to-branch flow.
    CommitToBranch,
    /// Amend the last commit.
    AmendLastCommit,
    /// Discard changes to the selected file.
    UndoFileChanges,
    /// Open the provider settings page.
    ShowSettings,
    /// Initialize a repository at the current workspace.
    InitializeRepository,
}

impl HostAction {
    /// Short human-readable description of the effect.
    pub const fn description(self) -> &'static str {
        match self {
            HostAction::Refresh => "refresh repository status",
            HostAction::ShowHistory => "show the history view",
            HostAction::ShowPendingChanges => "show the pending-changes view",
            HostAction::Commit => "run the commit flow",
            HostAction::CommitToBranch => "run the commit-to-branch flow",
            HostAction::AmendLastCommit => "amend the last commit",
            HostAction::UndoFileChanges => "discard changes to the selected file",
            HostAction::ShowSettings => "open the settings page",
            HostAction::InitializeRepository => "initialize a repository",
        }
    }
}

impl std::fmt::Display for HostAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// What invoking a command resolves to, before any side effect happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Launch an external process, detached.
    Launch(ResolvedInvocation),
    /// Open a file in the configured editor or the platform handler,
    /// creating it first if needed.
    EditFile(PathBuf),
    /// Hand the effect back to the host.
    Host(HostAction),
}

/// Outcome of a completed invocation.
#[derive(Debug)]
pub enum Invoked {
    /// A detached process is running.
    Launched {
        /// Child process id.
        pid: u32,
        /// The invocation that was dispatched.
        invocation: ResolvedInvocation,
    },
    /// A file was opened for editing.
    Opened(PathBuf),
    /// The host must perform the effect.
    Host(HostAction),
}

/// Per-invocation context supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct InvokeContext {
    /// Baseline (unmodified) file for comparisons; substituted for
    /// `$LOCAL`.
    pub baseline: Option<PathBuf>,
    /// Working (modified) file for comparisons; substituted for
    /// `$REMOTE`.
    pub modified: Option<PathBuf>,
}

/// The command provider: catalog, tool configuration, and the master
/// active flag.
///
/// Reconfiguration replaces the whole provider value; queries in flight
/// keep the generation they started with.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    catalog: CommandCatalog,
    tools: ToolsConfig,
    active: bool,
}

impl CommandProvider {
    /// Create an active provider from a catalog and tool configuration.
    pub fn new(catalog: CommandCatalog, tools: ToolsConfig) -> Self {
        Self {
            catalog,
            tools,
            active: true,
        }
    }

    /// Override the master active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The provider's catalog.
    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Capture a fresh tool snapshot (one existence check per tool).
    ///
    /// Hosts typically capture once per idle tick and reuse the snapshot
    /// for the whole query sweep.
    pub fn tool_snapshot(&self) -> ToolSnapshot {
        ToolSnapshot::capture(&self.tools)
    }

    /// Availability of one command. Pure; safe to call in a tight loop.
    pub fn query_status(
        &self,
        id: CommandId,
        repo: &RepoState,
        tools: &ToolSnapshot,
    ) -> CommandStatus {
        gate::evaluate(&self.catalog, id, repo, tools, self.active)
    }

    /// Resolve a command into its invocation without performing it.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::NotSupported`] for ids outside the catalog
    /// - [`ProviderError::Configuration`] when a required tool path or
    ///   context is missing (defensive re-check)
    /// - [`ProviderError::Resolve`] when a template has no executable token
    pub fn plan_invocation(
        &self,
        id: CommandId,
        repo: &RepoState,
        tools: &ToolSnapshot,
        ctx: &InvokeContext,
    ) -> Result<Invocation, ProviderError> {
        match self.catalog.resolve(id) {
            Resolved::Fixed(cmd) => self.plan_fixed(cmd, repo, tools, ctx),
            Resolved::Dynamic { group, entry, .. } => {
                self.plan_dynamic(id, group, entry, repo, tools)
            }
            Resolved::NotFound => Err(ProviderError::NotSupported(id)),
        }
    }

    /// Resolve and carry out a command invocation.
    ///
    /// Launches are detached; the provider never waits on a child. File
    /// edits create the target file on demand and fall back to the
    /// platform opener when no editor is configured.
    pub fn invoke(
        &self,
        id: CommandId,
        repo: &RepoState,
        tools: &ToolSnapshot,
        ctx: &InvokeContext,
    ) -> Result<Invoked, ProviderError> {
        match self.plan_invocation(id, repo, tools, ctx)? {
            Invocation::Launch(invocation) => {
                let pid = launch::launch_detached(&invocation)?;
                Ok(Invoked::Launched { pid, invocation })
            }
            Invocation::EditFile(path) => {
                ensure_file_exists(&path)?;
                match editor_invocation(&tools.editor, &path, repo) {
                    Some(invocation) => {
                        let pid = launch::launch_detached(&invocation)?;
                        Ok(Invoked::Launched { pid, invocation })
                    }
                    None => {
                        launch::open_with_default_handler(&path)?;
                        Ok(Invoked::Opened(path))
                    }
                }
            }
            Invocation::Host(action) => Ok(Invoked::Host(action)),
        }
    }

    fn plan_fixed(
        &self,
        cmd: FixedCommand,
        repo: &RepoState,
        tools: &ToolSnapshot,
        ctx: &InvokeContext,
    ) -> Result<Invocation, ProviderError> {
        match cmd {
            // Menus are rendered, not invoked.
            FixedCommand::RootMenu => Err(ProviderError::NotSupported(cmd.id())),

            FixedCommand::Refresh => Ok(Invocation::Host(HostAction::Refresh)),
            FixedCommand::History => Ok(Invocation::Host(HostAction::ShowHistory)),
            FixedCommand::PendingChanges => {
                Ok(Invocation::Host(HostAction::ShowPendingChanges))
            }
            FixedCommand::Commit => Ok(Invocation::Host(HostAction::Commit)),
            FixedCommand::CommitToBranch => Ok(Invocation::Host(HostAction::CommitToBranch)),
            FixedCommand::Amend => Ok(Invocation::Host(HostAction::AmendLastCommit)),
            FixedCommand::Undo => Ok(Invocation::Host(HostAction::UndoFileChanges)),
            FixedCommand::Settings => Ok(Invocation::Host(HostAction::ShowSettings)),
            FixedCommand::Init => Ok(Invocation::Host(HostAction::InitializeRepository)),

            FixedCommand::Shell => {
                let shell = required_tool(&tools.shell, "shell")?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable: shell.display().to_string(),
                    arguments: " --login -i".to_string(),
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            FixedCommand::ExtensionGui => {
                let path = required_tool(&tools.extension_gui, "extension GUI")?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable: path.display().to_string(),
                    arguments: String::new(),
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            FixedCommand::AlternateGui => {
                let path = required_tool(&tools.alternate_gui, "alternate GUI")?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable: path.display().to_string(),
                    arguments: " /command:log".to_string(),
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            FixedCommand::Compare => {
                let template = tools.diff_template.as_deref().ok_or_else(|| {
                    ProviderError::Configuration(
                        "no diff tool template configured; set tools.diff".to_string(),
                    )
                })?;
                let baseline = ctx.baseline.as_deref().ok_or_else(|| {
                    ProviderError::Configuration(
                        "compare requires a baseline file".to_string(),
                    )
                })?;
                let modified = ctx
                    .modified
                    .as_deref()
                    .or(repo.selected_file.as_deref())
                    .ok_or_else(|| {
                        ProviderError::Configuration(
                            "compare requires a modified file".to_string(),
                        )
                    })?;
                let baseline = baseline.display().to_string();
                let modified = modified.display().to_string();
                let (executable, arguments) = resolve_command(
                    template,
                    &[
                        (launch::resolve::LOCAL, baseline.as_str()),
                        (launch::resolve::REMOTE, modified.as_str()),
                    ],
                )?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable,
                    arguments,
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            FixedCommand::EditIgnore => {
                let workdir = repo.workdir.as_deref().ok_or_else(|| {
                    ProviderError::Configuration(
                        "repository has no working directory".to_string(),
                    )
                })?;
                Ok(Invocation::EditFile(workdir.join(".gitignore")))
            }
        }
    }

    fn plan_dynamic(
        &self,
        id: CommandId,
        group: CommandGroup,
        entry: &DynamicCommand,
        repo: &RepoState,
        tools: &ToolSnapshot,
    ) -> Result<Invocation, ProviderError> {
        match group {
            CommandGroup::ExtensionTool => {
                let tool = &tools.extension_gui;
                if !(tool.usable() && tool.expand_inline) {
                    return Err(ProviderError::NotSupported(id));
                }
                let path = required_tool(tool, "extension GUI")?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable: path.display().to_string(),
                    arguments: format!(" {}", entry.command),
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            CommandGroup::AlternateGui => {
                let tool = &tools.alternate_gui;
                if !(tool.usable() && tool.expand_inline) {
                    return Err(ProviderError::NotSupported(id));
                }
                let path = required_tool(tool, "alternate GUI")?;
                let target = dynamic_target(entry.scope, repo)?;
                Ok(Invocation::Launch(ResolvedInvocation {
                    executable: path.display().to_string(),
                    arguments: format!(" {} /path:\"{}\"", entry.command, target.display()),
                    working_dir: launch::working_dir_for(repo)?,
                }))
            }

            CommandGroup::IgnoreEditor => {
                let workdir = repo.workdir.as_deref().ok_or_else(|| {
                    ProviderError::Configuration(
                        "repository has no working directory".to_string(),
                    )
                })?;
                Ok(Invocation::EditFile(workdir.join(&entry.command)))
            }
        }
    }
}

/// The launch target of a scoped dynamic command: the selected file for
/// file-scoped entries (unless the selection is the workspace descriptor
/// itself), the working directory otherwise.
fn dynamic_target(scope: CommandScope, repo: &RepoState) -> Result<PathBuf, ProviderError> {
    let workdir = launch::working_dir_for(repo)?;
    match scope {
        CommandScope::Repository => Ok(workdir),
        CommandScope::SelectedFile => match repo.selected_file.as_deref() {
            Some(file) if Some(file) != repo.workspace_file.as_deref() => {
                Ok(file.to_path_buf())
            }
            _ => Ok(workdir),
        },
    }
}

/// Defensive invocation-time re-check of a tool path.
fn required_tool<'t>(
    tool: &'t ToolFacts,
    what: &str,
) -> Result<&'t std::path::Path, ProviderError> {
    let path = tool.path.as_deref().ok_or_else(|| {
        ProviderError::Configuration(format!("no {what} path configured"))
    })?;
    if !path.is_file() {
        return Err(ProviderError::Configuration(format!(
            "{what} not found at '{}'",
            path.display()
        )));
    }
    Ok(path)
}

/// Make sure an ignore file exists before handing it to an editor.
fn ensure_file_exists(path: &std::path::Path) -> Result<(), ProviderError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            ProviderError::Configuration(format!(
                "cannot create '{}': {err}",
                parent.display()
            ))
        })?;
    }
    std::fs::write(path, b"").map_err(|err| {
        ProviderError::Configuration(format!("cannot create '{}': {err}", path.display()))
    })
}

/// Build the editor invocation for a file, when an editor is configured
/// and present.
fn editor_invocation(
    editor: &ToolFacts,
    file: &std::path::Path,
    repo: &RepoState,
) -> Option<ResolvedInvocation> {
    if !editor.usable() {
        return None;
    }
    let path = editor.path.as_deref()?;
    Some(ResolvedInvocation {
        executable: path.display().to_string(),
        arguments: format!(" \"{}\"", file.display()),
        working_dir: repo.launch_dir().unwrap_or_else(|| {
            file.parent()
                .map(std::path::Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        }),
    })
}

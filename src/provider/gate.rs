//! provider::gate
//!
//! The availability state machine: per-command visibility, enablement, and
//! label overrides.
//!
//! # Architecture
//!
//! The host asks once per command per idle tick; [`evaluate`] answers from
//! three read-only inputs (catalog, repository snapshot, tool snapshot)
//! and a master active flag. It is a pure function: no mutation, no I/O,
//! no shared accumulator, so back-to-back calls in a tight loop are safe
//! and idempotent.
//!
//! # Supported vs hidden
//!
//! [`CommandStatus::NotSupported`] tells the host this provider does not
//! own the id at all, so it may ask another provider. A supported command
//! with `visible == false` is owned but currently irrelevant. The two are
//! never conflated; the host's fallback behavior depends on the
//! distinction.

use crate::catalog::{CommandCatalog, CommandGroup, CommandId, FixedCommand, Resolved};
use crate::repo::RepoState;
use crate::tools::ToolSnapshot;

/// Per-query availability verdict for one command id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// The id is not handled by this provider; the host should fall back.
    NotSupported,
    /// The id is owned by this provider.
    Supported {
        /// Whether the command appears in the host UI.
        visible: bool,
        /// Whether the command can be invoked right now.
        enabled: bool,
        /// Replacement display label, when the default does not apply.
        label: Option<String>,
    },
}

impl CommandStatus {
    /// Visible and enabled, default label.
    pub const fn enabled() -> Self {
        CommandStatus::Supported {
            visible: true,
            enabled: true,
            label: None,
        }
    }

    /// Visible but not currently invocable.
    pub const fn disabled() -> Self {
        CommandStatus::Supported {
            visible: true,
            enabled: false,
            label: None,
        }
    }

    /// Owned but hidden from the UI entirely.
    pub const fn hidden() -> Self {
        CommandStatus::Supported {
            visible: false,
            enabled: false,
            label: None,
        }
    }

    /// Visible with enablement decided by `on`.
    pub const fn enabled_if(on: bool) -> Self {
        CommandStatus::Supported {
            visible: true,
            enabled: on,
            label: None,
        }
    }

    /// Attach a label override.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        match self {
            CommandStatus::Supported {
                visible, enabled, ..
            } => CommandStatus::Supported {
                visible,
                enabled,
                label: Some(label.into()),
            },
            CommandStatus::NotSupported => CommandStatus::NotSupported,
        }
    }

    /// Whether this provider owns the command.
    pub fn is_supported(&self) -> bool {
        matches!(self, CommandStatus::Supported { .. })
    }

    /// Whether the command is currently invocable.
    pub fn is_enabled(&self) -> bool {
        matches!(
            self,
            CommandStatus::Supported { enabled: true, .. }
        )
    }

    /// Whether the command appears in the UI.
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            CommandStatus::Supported { visible: true, .. }
        )
    }

    /// The label override, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            CommandStatus::Supported { label, .. } => label.as_deref(),
            CommandStatus::NotSupported => None,
        }
    }
}

/// The root menu label: carries the branch name when it is known.
pub fn root_menu_label(branch: Option<&str>) -> String {
    match branch {
        Some(branch) if !branch.is_empty() => format!("Git ({branch})"),
        _ => "Git".to_string(),
    }
}

/// Evaluate the availability of one command.
///
/// Rules are checked in priority order; the first applicable rule wins.
/// An inactive provider hides every command before anything else is
/// considered.
pub fn evaluate(
    catalog: &CommandCatalog,
    id: CommandId,
    repo: &RepoState,
    tools: &ToolSnapshot,
    active: bool,
) -> CommandStatus {
    if !active {
        return CommandStatus::hidden();
    }

    match catalog.resolve(id) {
        Resolved::Fixed(cmd) => evaluate_fixed(cmd, repo, tools),
        Resolved::Dynamic { group, entry, .. } => {
            let owner = match group {
                CommandGroup::ExtensionTool => Some(&tools.extension_gui),
                CommandGroup::AlternateGui => Some(&tools.alternate_gui),
                // Ignore entries have no owning executable to check.
                CommandGroup::IgnoreEditor => None,
            };
            match owner {
                Some(tool) if !(tool.usable() && tool.expand_inline) => {
                    // Collapsed or unusable tool: the range is not served,
                    // the host must fall back to default handling.
                    CommandStatus::NotSupported
                }
                _ => CommandStatus::enabled().with_label(entry.name.clone()),
            }
        }
        Resolved::NotFound => CommandStatus::NotSupported,
    }
}

fn evaluate_fixed(cmd: FixedCommand, repo: &RepoState, tools: &ToolSnapshot) -> CommandStatus {
    match cmd {
        FixedCommand::RootMenu => {
            CommandStatus::enabled().with_label(root_menu_label(repo.current_branch.as_deref()))
        }

        FixedCommand::Refresh | FixedCommand::Settings => CommandStatus::enabled(),

        FixedCommand::Shell => CommandStatus::enabled_if(tools.shell.usable()),

        FixedCommand::ExtensionGui => gui_launch_status(&tools.extension_gui),
        FixedCommand::AlternateGui => gui_launch_status(&tools.alternate_gui),

        FixedCommand::Compare | FixedCommand::Undo => CommandStatus::enabled_if(
            repo.git_tool_exists && repo.has_selected_comparable_file,
        ),

        FixedCommand::EditIgnore => CommandStatus::enabled_if(repo.is_git_repository),

        FixedCommand::History
        | FixedCommand::PendingChanges
        | FixedCommand::Commit
        | FixedCommand::CommitToBranch
        | FixedCommand::Amend => {
            CommandStatus::enabled_if(repo.git_tool_exists && repo.is_git_repository)
        }

        FixedCommand::Init => {
            if repo.is_git_repository {
                CommandStatus::hidden()
            } else {
                CommandStatus::enabled()
            }
        }
    }
}

/// A GUI's single launch command: enabled when the tool is present and not
/// expanded into its per-command list; hidden otherwise.
fn gui_launch_status(tool: &crate::tools::ToolFacts) -> CommandStatus {
    if tool.usable() && !tool.expand_inline {
        CommandStatus::enabled()
    } else {
        CommandStatus::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ALTERNATE_BASE, EXTENSION_BASE, IGNORE_BASE};
    use crate::tools::ToolFacts;
    use std::path::PathBuf;

    fn tool(exists: bool, expand_inline: bool) -> ToolFacts {
        ToolFacts {
            path: Some(PathBuf::from("/opt/tool/tool")),
            exists,
            expand_inline,
        }
    }

    fn git_repo_state() -> RepoState {
        RepoState {
            is_git_repository: true,
            current_branch: Some("main".to_string()),
            workdir: Some(PathBuf::from("/work/repo")),
            git_tool_exists: true,
            ..RepoState::default()
        }
    }

    fn all_tools() -> ToolSnapshot {
        ToolSnapshot {
            git: tool(true, false),
            shell: tool(true, false),
            diff_template: Some("difftool $LOCAL $REMOTE".to_string()),
            editor: tool(true, false),
            extension_gui: tool(true, false),
            alternate_gui: tool(true, false),
        }
    }

    mod inactive_provider {
        use super::*;

        #[test]
        fn every_command_is_hidden() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools();
            for id in catalog.known_ids() {
                let status = evaluate(&catalog, id, &repo, &tools, false);
                assert_eq!(status, CommandStatus::hidden(), "id {id}");
            }
        }
    }

    mod root_menu {
        use super::*;

        #[test]
        fn label_carries_known_branch() {
            assert_eq!(root_menu_label(Some("main")), "Git (main)");
        }

        #[test]
        fn label_is_plain_when_branch_unknown() {
            assert_eq!(root_menu_label(None), "Git");
            assert_eq!(root_menu_label(Some("")), "Git");
        }

        #[test]
        fn evaluate_attaches_branch_label() {
            let catalog = CommandCatalog::builtin();
            let status = evaluate(
                &catalog,
                FixedCommand::RootMenu.id(),
                &git_repo_state(),
                &all_tools(),
                true,
            );
            assert_eq!(status.label(), Some("Git (main)"));
            assert!(status.is_enabled());
        }
    }

    mod tool_launches {
        use super::*;

        #[test]
        fn shell_requires_existing_shell() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();

            let status = evaluate(&catalog, FixedCommand::Shell.id(), &repo, &tools, true);
            assert!(status.is_enabled());

            tools.shell = tool(false, false);
            let status = evaluate(&catalog, FixedCommand::Shell.id(), &repo, &tools, true);
            assert!(status.is_supported());
            assert!(!status.is_enabled());
            assert!(status.is_visible());
        }

        #[test]
        fn gui_enabled_when_present_and_collapsed() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools();
            let status = evaluate(
                &catalog,
                FixedCommand::AlternateGui.id(),
                &repo,
                &tools,
                true,
            );
            assert!(status.is_enabled());
        }

        #[test]
        fn gui_hidden_when_expanded() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();
            tools.alternate_gui = tool(true, true);
            let status = evaluate(
                &catalog,
                FixedCommand::AlternateGui.id(),
                &repo,
                &tools,
                true,
            );
            assert!(status.is_supported());
            assert!(!status.is_visible());
        }

        #[test]
        fn gui_hidden_when_missing() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();
            tools.extension_gui = ToolFacts::default();
            let status = evaluate(
                &catalog,
                FixedCommand::ExtensionGui.id(),
                &repo,
                &tools,
                true,
            );
            assert!(!status.is_visible());
        }
    }

    mod file_commands {
        use super::*;

        #[test]
        fn compare_needs_git_and_a_comparable_file() {
            let catalog = CommandCatalog::builtin();
            let tools = all_tools();

            let mut repo = git_repo_state();
            repo.has_selected_comparable_file = true;
            assert!(evaluate(&catalog, FixedCommand::Compare.id(), &repo, &tools, true)
                .is_enabled());

            repo.has_selected_comparable_file = false;
            assert!(!evaluate(&catalog, FixedCommand::Compare.id(), &repo, &tools, true)
                .is_enabled());

            repo.has_selected_comparable_file = true;
            repo.git_tool_exists = false;
            assert!(!evaluate(&catalog, FixedCommand::Compare.id(), &repo, &tools, true)
                .is_enabled());
        }

        #[test]
        fn undo_follows_the_same_gate_as_compare() {
            let catalog = CommandCatalog::builtin();
            let tools = all_tools();
            let mut repo = git_repo_state();
            repo.has_selected_comparable_file = true;
            assert!(
                evaluate(&catalog, FixedCommand::Undo.id(), &repo, &tools, true).is_enabled()
            );
        }
    }

    mod repository_commands {
        use super::*;

        #[test]
        fn repo_scoped_commands_need_git_tool_and_repo() {
            let catalog = CommandCatalog::builtin();
            let tools = all_tools();
            let repo = git_repo_state();

            for cmd in [
                FixedCommand::History,
                FixedCommand::PendingChanges,
                FixedCommand::Commit,
                FixedCommand::CommitToBranch,
                FixedCommand::Amend,
            ] {
                assert!(
                    evaluate(&catalog, cmd.id(), &repo, &tools, true).is_enabled(),
                    "{cmd} should be enabled in a git repo"
                );
            }
        }

        #[test]
        fn repo_scoped_commands_disabled_outside_a_repo() {
            let catalog = CommandCatalog::builtin();
            let tools = all_tools();
            let repo = RepoState {
                git_tool_exists: true,
                ..RepoState::default()
            };

            for cmd in [FixedCommand::History, FixedCommand::Commit] {
                let status = evaluate(&catalog, cmd.id(), &repo, &tools, true);
                assert!(status.is_visible(), "{cmd} stays visible");
                assert!(!status.is_enabled(), "{cmd} must be disabled");
            }
        }

        #[test]
        fn refresh_and_settings_are_always_enabled() {
            let catalog = CommandCatalog::builtin();
            let tools = ToolSnapshot::default();
            let repo = RepoState::default();
            assert!(evaluate(&catalog, FixedCommand::Refresh.id(), &repo, &tools, true)
                .is_enabled());
            assert!(evaluate(&catalog, FixedCommand::Settings.id(), &repo, &tools, true)
                .is_enabled());
        }

        #[test]
        fn init_enabled_only_outside_a_repo() {
            let catalog = CommandCatalog::builtin();
            let tools = all_tools();

            let outside = RepoState::default();
            let status = evaluate(&catalog, FixedCommand::Init.id(), &outside, &tools, true);
            assert!(status.is_visible());
            assert!(status.is_enabled());

            let inside = git_repo_state();
            let status = evaluate(&catalog, FixedCommand::Init.id(), &inside, &tools, true);
            assert!(!status.is_visible());
            assert!(!status.is_enabled());
        }

        #[test]
        fn edit_ignore_needs_a_repo_only() {
            let catalog = CommandCatalog::builtin();
            let tools = ToolSnapshot::default();
            let repo = RepoState {
                is_git_repository: true,
                ..RepoState::default()
            };
            assert!(evaluate(&catalog, FixedCommand::EditIgnore.id(), &repo, &tools, true)
                .is_enabled());
        }
    }

    mod dynamic_groups {
        use super::*;

        #[test]
        fn expanded_tool_serves_its_range() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();
            tools.alternate_gui = tool(true, true);

            let id = ALTERNATE_BASE;
            let status = evaluate(&catalog, id, &repo, &tools, true);
            assert!(status.is_enabled());
            let expected = &catalog.group(CommandGroup::AlternateGui)[0].name;
            assert_eq!(status.label(), Some(expected.as_str()));
        }

        #[test]
        fn collapsed_tool_does_not_serve_its_range() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools(); // expand_inline is false

            let status = evaluate(&catalog, EXTENSION_BASE, &repo, &tools, true);
            assert_eq!(status, CommandStatus::NotSupported);
        }

        #[test]
        fn missing_tool_does_not_serve_its_range() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();
            tools.extension_gui = ToolFacts {
                path: Some(PathBuf::from("/gone")),
                exists: false,
                expand_inline: true,
            };
            let status = evaluate(&catalog, EXTENSION_BASE, &repo, &tools, true);
            assert_eq!(status, CommandStatus::NotSupported);
        }

        #[test]
        fn ignore_entries_need_no_tool() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = ToolSnapshot::default();
            let status = evaluate(&catalog, IGNORE_BASE, &repo, &tools, true);
            assert!(status.is_enabled());
            assert!(status.label().is_some());
        }

        #[test]
        fn id_past_configured_list_is_not_supported() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let mut tools = all_tools();
            tools.extension_gui = tool(true, true);
            let past_end = CommandId::new(
                EXTENSION_BASE.as_u32()
                    + catalog.group(CommandGroup::ExtensionTool).len() as u32,
            );
            assert_eq!(
                evaluate(&catalog, past_end, &repo, &tools, true),
                CommandStatus::NotSupported
            );
        }
    }

    mod totality {
        use super::*;

        #[test]
        fn unknown_ids_are_not_supported_never_panic() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools();
            for raw in [0u32, 0x0ff, 0x1f0, 0x7fff, u32::MAX] {
                assert_eq!(
                    evaluate(&catalog, CommandId::new(raw), &repo, &tools, true),
                    CommandStatus::NotSupported
                );
            }
        }

        #[test]
        fn evaluation_is_idempotent() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools();
            for id in catalog.known_ids() {
                let first = evaluate(&catalog, id, &repo, &tools, true);
                let second = evaluate(&catalog, id, &repo, &tools, true);
                assert_eq!(first, second, "id {id}");
            }
        }

        #[test]
        fn evaluation_does_not_mutate_inputs() {
            let catalog = CommandCatalog::builtin();
            let repo = git_repo_state();
            let tools = all_tools();
            let repo_before = repo.clone();
            let tools_before = tools.clone();
            for id in catalog.known_ids() {
                let _ = evaluate(&catalog, id, &repo, &tools, true);
            }
            assert_eq!(repo, repo_before);
            assert_eq!(tools, tools_before);
        }
    }
}

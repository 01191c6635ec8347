//! catalog
//!
//! The command catalog: fixed well-known commands plus three dynamic command
//! groups exposed through reserved contiguous id ranges.
//!
//! # Architecture
//!
//! The host shell addresses every command by a numeric id. Fixed commands
//! have compile-time ids; dynamic commands (extension-tool entries,
//! alternate-GUI entries, ignore-editor entries) are configuration-supplied
//! lists whose entries take ids from a reserved range starting at the
//! group's base offset. The mapping `id -> (group, index)` is pure
//! arithmetic over the base offsets; no per-id state is ever stored.
//!
//! # Invariants
//!
//! - The three dynamic ranges never overlap each other or the fixed ids
//!   (checked by [`CommandCatalog::from_lists`] and by tests)
//! - `resolve` is total: every id maps to exactly one outcome, and unknown
//!   ids yield [`Resolved::NotFound`] rather than a panic
//! - A catalog is immutable once built; configuration changes produce a
//!   whole new catalog value, never an in-place mutation
//!
//! # Example
//!
//! ```
//! use toolgate::catalog::{CommandCatalog, CommandId, FixedCommand, Resolved};
//!
//! let catalog = CommandCatalog::builtin();
//!
//! match catalog.resolve(FixedCommand::Refresh.id()) {
//!     Resolved::Fixed(cmd) => assert_eq!(cmd, FixedCommand::Refresh),
//!     _ => unreachable!(),
//! }
//!
//! // Ids outside every range resolve to NotFound, deterministically.
//! assert!(matches!(catalog.resolve(CommandId::new(0xdead)), Resolved::NotFound));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A dynamic group list exceeds its reserved id range.
    #[error("{group} command list has {len} entries, range holds {capacity}")]
    GroupTooLarge {
        /// The overflowing group
        group: CommandGroup,
        /// Number of configured entries
        len: usize,
        /// Reserved range capacity
        capacity: u32,
    },
}

/// A numeric command identity as reported by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(u32);

impl CommandId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Offset of this id within a range starting at `base`, if it falls
    /// inside `[base, base + capacity)`.
    pub const fn index_in(self, base: CommandId, capacity: u32) -> Option<u32> {
        if self.0 >= base.0 && self.0 < base.0 + capacity {
            Some(self.0 - base.0)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Whether a command acts on the whole repository or the selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandScope {
    /// Target is the repository working directory.
    #[default]
    Repository,
    /// Target is the file currently selected in the host.
    SelectedFile,
}

/// The dynamic command groups.
///
/// Each group owns a reserved contiguous id range; entries are addressed as
/// `base + index` where `index` is the position in the configured list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGroup {
    /// Per-command entries of the extension-tool GUI.
    ExtensionTool,
    /// Per-command entries of the alternate VCS GUI.
    AlternateGui,
    /// Ignore-file editor entries.
    IgnoreEditor,
}

impl CommandGroup {
    /// Base id of this group's reserved range.
    pub const fn base(self) -> CommandId {
        match self {
            CommandGroup::ExtensionTool => EXTENSION_BASE,
            CommandGroup::AlternateGui => ALTERNATE_BASE,
            CommandGroup::IgnoreEditor => IGNORE_BASE,
        }
    }

    /// Maximum number of entries the reserved range can address.
    pub const fn capacity(self) -> u32 {
        GROUP_CAPACITY
    }
}

impl std::fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommandGroup::ExtensionTool => "extension-tool",
            CommandGroup::AlternateGui => "alternate-gui",
            CommandGroup::IgnoreEditor => "ignore-editor",
        };
        write!(f, "{name}")
    }
}

/// Number of ids reserved per dynamic group.
pub const GROUP_CAPACITY: u32 = 64;

/// Base of the extension-tool command range.
pub const EXTENSION_BASE: CommandId = CommandId::new(0x0200);

/// Base of the alternate-GUI command range.
pub const ALTERNATE_BASE: CommandId = CommandId::new(0x0300);

/// Base of the ignore-editor command range.
///
/// Indices in this range are computed from this base, not from the
/// alternate-GUI base.
pub const IGNORE_BASE: CommandId = CommandId::new(0x0400);

/// The fixed, well-known commands.
///
/// Constructed once at startup and immutable thereafter. The numeric ids
/// sit below every dynamic range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixedCommand {
    /// The root menu entry; its label carries the current branch name.
    RootMenu,
    /// Re-read repository status.
    Refresh,
    /// Open an interactive shell in the repository.
    Shell,
    /// Launch the extension-tool GUI.
    ExtensionGui,
    /// Launch the alternate VCS GUI.
    AlternateGui,
    /// Compare the selected file against its baseline.
    Compare,
    /// Discard changes to the selected file.
    Undo,
    /// Edit the repository ignore file.
    EditIgnore,
    /// Show the history view.
    History,
    /// Show the pending-changes view.
    PendingChanges,
    /// Commit staged changes.
    Commit,
    /// Commit to a different branch.
    CommitToBranch,
    /// Amend the last commit.
    Amend,
    /// Initialize a repository where none exists.
    Init,
    /// Open the provider settings page.
    Settings,
}

impl FixedCommand {
    /// All fixed commands, in catalog order.
    pub const ALL: [FixedCommand; 15] = [
        FixedCommand::RootMenu,
        FixedCommand::Refresh,
        FixedCommand::Shell,
        FixedCommand::ExtensionGui,
        FixedCommand::AlternateGui,
        FixedCommand::Compare,
        FixedCommand::Undo,
        FixedCommand::EditIgnore,
        FixedCommand::History,
        FixedCommand::PendingChanges,
        FixedCommand::Commit,
        FixedCommand::CommitToBranch,
        FixedCommand::Amend,
        FixedCommand::Init,
        FixedCommand::Settings,
    ];

    /// The fixed numeric id of this command.
    pub const fn id(self) -> CommandId {
        CommandId::new(match self {
            FixedCommand::RootMenu => 0x0100,
            FixedCommand::Refresh => 0x0101,
            FixedCommand::Shell => 0x0102,
            FixedCommand::ExtensionGui => 0x0103,
            FixedCommand::AlternateGui => 0x0104,
            FixedCommand::Compare => 0x0105,
            FixedCommand::Undo => 0x0106,
            FixedCommand::EditIgnore => 0x0107,
            FixedCommand::History => 0x0108,
            FixedCommand::PendingChanges => 0x0109,
            FixedCommand::Commit => 0x010a,
            FixedCommand::CommitToBranch => 0x010b,
            FixedCommand::Amend => 0x010c,
            FixedCommand::Init => 0x010d,
            FixedCommand::Settings => 0x010e,
        })
    }

    /// Look up a fixed command by id.
    pub fn from_id(id: CommandId) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }

    /// Stable kebab-case name, used by the CLI and in JSON output.
    pub const fn name(self) -> &'static str {
        match self {
            FixedCommand::RootMenu => "menu",
            FixedCommand::Refresh => "refresh",
            FixedCommand::Shell => "shell",
            FixedCommand::ExtensionGui => "extension-gui",
            FixedCommand::AlternateGui => "alternate-gui",
            FixedCommand::Compare => "compare",
            FixedCommand::Undo => "undo",
            FixedCommand::EditIgnore => "edit-ignore",
            FixedCommand::History => "history",
            FixedCommand::PendingChanges => "pending-changes",
            FixedCommand::Commit => "commit",
            FixedCommand::CommitToBranch => "commit-to-branch",
            FixedCommand::Amend => "amend",
            FixedCommand::Init => "init",
            FixedCommand::Settings => "settings",
        }
    }

    /// Look up a fixed command by its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    /// Default menu label shown by the host.
    pub const fn label(self) -> &'static str {
        match self {
            FixedCommand::RootMenu => "Git",
            FixedCommand::Refresh => "Refresh",
            FixedCommand::Shell => "Open Shell",
            FixedCommand::ExtensionGui => "Git Extensions",
            FixedCommand::AlternateGui => "Git GUI",
            FixedCommand::Compare => "Compare File",
            FixedCommand::Undo => "Undo File Changes",
            FixedCommand::EditIgnore => "Edit Ignore File",
            FixedCommand::History => "History",
            FixedCommand::PendingChanges => "Pending Changes",
            FixedCommand::Commit => "Commit",
            FixedCommand::CommitToBranch => "Commit to Branch",
            FixedCommand::Amend => "Amend Last Commit",
            FixedCommand::Init => "Initialize Repository",
            FixedCommand::Settings => "Settings",
        }
    }

    /// Whether the command targets the repository or the selected file.
    pub const fn scope(self) -> CommandScope {
        match self {
            FixedCommand::Compare | FixedCommand::Undo => CommandScope::SelectedFile,
            _ => CommandScope::Repository,
        }
    }
}

impl std::fmt::Display for FixedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One configuration-supplied entry of a dynamic command group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicCommand {
    /// Display name shown in the host menu.
    pub name: String,
    /// Invocation payload. For extension-tool entries this is the argument
    /// string passed to the extension GUI; for alternate-GUI entries the
    /// command verb the GUI expects; for ignore-editor entries the ignore
    /// file path relative to the repository root.
    pub command: String,
    /// Target scope of the entry.
    #[serde(default)]
    pub scope: CommandScope,
}

impl DynamicCommand {
    /// Convenience constructor for repository-scoped entries.
    pub fn repository(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            scope: CommandScope::Repository,
        }
    }

    /// Convenience constructor for file-scoped entries.
    pub fn selected_file(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            scope: CommandScope::SelectedFile,
        }
    }
}

/// Outcome of resolving a command id against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A fixed well-known command.
    Fixed(FixedCommand),
    /// An entry of a dynamic group.
    Dynamic {
        /// The owning group.
        group: CommandGroup,
        /// Position within the group's configured list.
        index: usize,
        /// The configured entry.
        entry: &'a DynamicCommand,
    },
    /// The id falls outside every known range, or inside a range but past
    /// the end of the configured list.
    NotFound,
}

/// The complete command catalog for one configuration generation.
///
/// Rebuilt as a whole whenever the tool-list configuration changes; queries
/// in flight keep reading the generation they started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCatalog {
    extension: Vec<DynamicCommand>,
    alternate: Vec<DynamicCommand>,
    ignore: Vec<DynamicCommand>,
}

impl CommandCatalog {
    /// Build a catalog from the three dynamic lists.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::GroupTooLarge`] if a list does not fit its
    /// reserved id range.
    pub fn from_lists(
        extension: Vec<DynamicCommand>,
        alternate: Vec<DynamicCommand>,
        ignore: Vec<DynamicCommand>,
    ) -> Result<Self, CatalogError> {
        for (group, list) in [
            (CommandGroup::ExtensionTool, &extension),
            (CommandGroup::AlternateGui, &alternate),
            (CommandGroup::IgnoreEditor, &ignore),
        ] {
            if list.len() > group.capacity() as usize {
                return Err(CatalogError::GroupTooLarge {
                    group,
                    len: list.len(),
                    capacity: group.capacity(),
                });
            }
        }
        Ok(Self {
            extension,
            alternate,
            ignore,
        })
    }

    /// The built-in catalog: default dynamic lists matching the stock
    /// extension-tool and alternate-GUI command sets.
    pub fn builtin() -> Self {
        // Cannot overflow: default lists are far below GROUP_CAPACITY.
        Self::from_lists(
            default_extension_commands(),
            default_alternate_commands(),
            default_ignore_commands(),
        )
        .unwrap_or_else(|_| Self {
            extension: Vec::new(),
            alternate: Vec::new(),
            ignore: Vec::new(),
        })
    }

    /// The configured entries of a group, in id order.
    pub fn group(&self, group: CommandGroup) -> &[DynamicCommand] {
        match group {
            CommandGroup::ExtensionTool => &self.extension,
            CommandGroup::AlternateGui => &self.alternate,
            CommandGroup::IgnoreEditor => &self.ignore,
        }
    }

    /// Map a dynamic id to its owning group and index, without consulting
    /// the configured lists.
    ///
    /// Pure arithmetic over the group base offsets. An id inside a reserved
    /// range maps to that group even when the configured list is shorter;
    /// [`CommandCatalog::resolve`] applies the length check.
    pub fn group_of(id: CommandId) -> Option<(CommandGroup, usize)> {
        for group in [
            CommandGroup::ExtensionTool,
            CommandGroup::AlternateGui,
            CommandGroup::IgnoreEditor,
        ] {
            if let Some(index) = id.index_in(group.base(), group.capacity()) {
                return Some((group, index as usize));
            }
        }
        None
    }

    /// Resolve an id to its descriptor.
    ///
    /// Total: unknown ids and ids past the end of a configured list yield
    /// [`Resolved::NotFound`], never a panic.
    pub fn resolve(&self, id: CommandId) -> Resolved<'_> {
        if let Some(cmd) = FixedCommand::from_id(id) {
            return Resolved::Fixed(cmd);
        }
        match Self::group_of(id) {
            Some((group, index)) => match self.group(group).get(index) {
                Some(entry) => Resolved::Dynamic {
                    group,
                    index,
                    entry,
                },
                None => Resolved::NotFound,
            },
            None => Resolved::NotFound,
        }
    }

    /// Iterate every id the catalog currently answers for: the fixed set
    /// followed by each populated dynamic slot.
    pub fn known_ids(&self) -> impl Iterator<Item = CommandId> + '_ {
        let fixed = FixedCommand::ALL.into_iter().map(FixedCommand::id);
        let dynamic = [
            CommandGroup::ExtensionTool,
            CommandGroup::AlternateGui,
            CommandGroup::IgnoreEditor,
        ]
        .into_iter()
        .flat_map(|group| {
            (0..self.group(group).len() as u32)
                .map(move |offset| CommandId::new(group.base().as_u32() + offset))
        });
        fixed.chain(dynamic)
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Stock extension-tool entries.
pub fn default_extension_commands() -> Vec<DynamicCommand> {
    vec![
        DynamicCommand::repository("Browse", "browse"),
        DynamicCommand::repository("Clone", "clone"),
        DynamicCommand::repository("Commit", "commit"),
        DynamicCommand::repository("Pull", "pull"),
        DynamicCommand::repository("Push", "push"),
        DynamicCommand::repository("Stash", "stash"),
        DynamicCommand::repository("Settings", "settings"),
    ]
}

/// Stock alternate-GUI entries.
pub fn default_alternate_commands() -> Vec<DynamicCommand> {
    vec![
        DynamicCommand::repository("Log", "/command:log"),
        DynamicCommand::repository("Commit", "/command:commit"),
        DynamicCommand::repository("Pull", "/command:pull"),
        DynamicCommand::repository("Push", "/command:push"),
        DynamicCommand::repository("Sync", "/command:sync"),
        DynamicCommand::repository("Switch Branch", "/command:switch"),
        DynamicCommand::selected_file("Blame", "/command:blame"),
        DynamicCommand::selected_file("File Log", "/command:log"),
    ]
}

/// Stock ignore-editor entries. The command payload is the ignore file's
/// path relative to the repository root.
pub fn default_ignore_commands() -> Vec<DynamicCommand> {
    vec![
        DynamicCommand::repository("Edit .gitignore", ".gitignore"),
        DynamicCommand::repository("Edit exclude file", ".git/info/exclude"),
    ]
}

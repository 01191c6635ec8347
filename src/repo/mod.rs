//! repo
//!
//! Read-only repository state snapshots.
//!
//! # Architecture
//!
//! This module is the single doorway to git2 in Toolgate. The availability
//! evaluator and the invocation planner never touch the repository
//! directly; they consume a [`RepoState`] snapshot scanned here once per
//! query tick. The snapshot is plain data, so hosts that track repository
//! state themselves (or tests) can construct one without any repository on
//! disk.
//!
//! # Error handling
//!
//! "Not a repository" is a state, not an error: scanning a directory with
//! no repository yields a snapshot with `is_git_repository == false`.
//! [`ScanError`] covers genuinely broken repositories only.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from repository scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The repository exists but could not be read.
    #[error("failed to read repository state: {message}")]
    RepoAccess {
        /// Underlying git error message
        message: String,
    },
}

impl From<git2::Error> for ScanError {
    fn from(err: git2::Error) -> Self {
        ScanError::RepoAccess {
            message: err.message().to_string(),
        }
    }
}

/// Externally observed repository state, consumed read-only by the
/// availability evaluator and the invocation planner.
///
/// One snapshot per query tick; the core never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoState {
    /// Whether the scanned directory is inside a git repository.
    pub is_git_repository: bool,
    /// Current branch name; `None` when unknown, detached, or not a repo.
    pub current_branch: Option<String>,
    /// Repository working directory, when the repository has one.
    pub workdir: Option<PathBuf>,
    /// The repository's git directory (for per-repo settings).
    pub git_dir: Option<PathBuf>,
    /// The workspace descriptor file supplied by the host, if any.
    pub workspace_file: Option<PathBuf>,
    /// The file currently selected in the host, if any.
    pub selected_file: Option<PathBuf>,
    /// Whether the selected file has changes worth comparing.
    pub has_selected_comparable_file: bool,
    /// Whether the configured git tool exists on disk.
    pub git_tool_exists: bool,
}

impl RepoState {
    /// Scan repository state starting from `start`.
    ///
    /// Discovery walks upward from `start`; a miss produces a snapshot
    /// with `is_git_repository == false` rather than an error. The
    /// `git_tool_exists` field is not known here; see
    /// [`RepoState::with_git_tool`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RepoAccess`] only when a discovered repository
    /// cannot be read.
    pub fn scan(
        start: &Path,
        selected_file: Option<&Path>,
        workspace_file: Option<&Path>,
    ) -> Result<Self, ScanError> {
        let repo = match git2::Repository::discover(start) {
            Ok(repo) => repo,
            Err(err) if err.code() == git2::ErrorCode::NotFound => {
                return Ok(Self {
                    selected_file: selected_file.map(Path::to_path_buf),
                    workspace_file: workspace_file.map(Path::to_path_buf),
                    ..Self::default()
                });
            }
            Err(err) => return Err(err.into()),
        };

        let workdir = repo.workdir().map(Path::to_path_buf);
        let comparable = match (selected_file, workdir.as_deref()) {
            (Some(file), Some(workdir)) => file_is_comparable(&repo, workdir, file),
            _ => false,
        };

        Ok(Self {
            is_git_repository: true,
            current_branch: current_branch(&repo),
            git_dir: Some(repo.path().to_path_buf()),
            workdir,
            workspace_file: workspace_file.map(Path::to_path_buf),
            selected_file: selected_file.map(Path::to_path_buf),
            has_selected_comparable_file: comparable,
            git_tool_exists: false,
        })
    }

    /// Record whether the configured git tool exists (known only after the
    /// tool snapshot is captured).
    pub fn with_git_tool(mut self, exists: bool) -> Self {
        self.git_tool_exists = exists;
        self
    }

    /// The directory a launched tool should inherit: the repository
    /// working directory when known, else the directory containing the
    /// workspace descriptor.
    pub fn launch_dir(&self) -> Option<PathBuf> {
        self.workdir.clone().or_else(|| {
            self.workspace_file
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        })
    }
}

/// The current branch shorthand, or `None` when HEAD is detached.
///
/// An unborn branch (fresh `git init`, no commits) still has a symbolic
/// HEAD, so its target branch name is reported.
fn current_branch(repo: &git2::Repository) -> Option<String> {
    if repo.head_detached().unwrap_or(false) {
        return None;
    }
    match repo.head() {
        Ok(head) => head.shorthand().map(str::to_string),
        Err(err)
            if err.code() == git2::ErrorCode::UnbornBranch
                || err.code() == git2::ErrorCode::NotFound =>
        {
            repo.find_reference("HEAD")
                .ok()
                .and_then(|head| head.symbolic_target().map(str::to_string))
                .and_then(|target| {
                    target
                        .strip_prefix("refs/heads/")
                        .map(str::to_string)
                })
        }
        Err(_) => None,
    }
}

/// Whether `file` has content differing from HEAD or the index, making a
/// comparison meaningful.
fn file_is_comparable(repo: &git2::Repository, workdir: &Path, file: &Path) -> bool {
    let relative = match file.strip_prefix(workdir) {
        Ok(relative) => relative,
        Err(_) => return false,
    };
    match repo.status_file(relative) {
        Ok(status) => {
            status.contains(git2::Status::WT_MODIFIED)
                || status.contains(git2::Status::INDEX_MODIFIED)
        }
        Err(_) => false,
    }
}

//! launch::spawn
//!
//! Process dispatch: detached launches and scoped captured runs.
//!
//! # Contract
//!
//! - [`launch_detached`] starts an independent process and returns without
//!   waiting. Only the start failure is surfaced; once running, the child
//!   outlives the core.
//! - [`launch_captured`] runs the process to completion and returns its
//!   output; process resources are released on every exit path.
//!
//! The working directory comes from [`working_dir_for`]: the repository
//! working directory when known, else the directory holding the workspace
//! descriptor, else a hard failure. Launching into whatever directory the
//! host happens to be in is never acceptable.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use super::resolve::unquote;
use crate::repo::RepoState;

/// Errors from process dispatch.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Neither a repository workdir nor a workspace descriptor is known.
    #[error("no working directory: repository workdir and workspace file are both unknown")]
    NoWorkingDirectory,

    /// The operating system refused to start the process.
    #[error("failed to start '{executable}': {source}")]
    SpawnFailed {
        /// The program that failed to start
        executable: String,
        /// The underlying OS error
        source: std::io::Error,
    },
}

/// A fully resolved invocation, built per command invocation and discarded
/// after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvocation {
    /// Executable token, possibly still carrying quotes.
    pub executable: String,
    /// Argument string, verbatim from resolution.
    pub arguments: String,
    /// Directory the child inherits.
    pub working_dir: PathBuf,
}

impl ResolvedInvocation {
    /// The bare program path, quotes stripped.
    pub fn program(&self) -> String {
        unquote(&self.executable)
    }

    /// The argument vector handed to the process-spawn primitive.
    ///
    /// The argument string is parsed with shell splitting rules; if it is
    /// not well-formed shell syntax, whitespace splitting is the fallback.
    pub fn argv(&self) -> Vec<String> {
        shell_words::split(self.arguments.trim()).unwrap_or_else(|_| {
            self.arguments
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
    }
}

impl std::fmt::Display for ResolvedInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.executable, self.arguments)
    }
}

/// Captured output of an attached run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Resolve the directory a launched tool should run in.
///
/// # Errors
///
/// Returns [`LaunchError::NoWorkingDirectory`] when neither the repository
/// workdir nor the workspace descriptor directory is known.
pub fn working_dir_for(repo: &RepoState) -> Result<PathBuf, LaunchError> {
    repo.launch_dir().ok_or(LaunchError::NoWorkingDirectory)
}

/// Start `invocation` as an independent process and return its pid.
///
/// Does not wait, does not capture output. The child keeps running after
/// the core (and the host) move on.
pub fn launch_detached(invocation: &ResolvedInvocation) -> Result<u32, LaunchError> {
    let program = invocation.program();
    let child = Command::new(&program)
        .args(invocation.argv())
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LaunchError::SpawnFailed {
            executable: program,
            source,
        })?;
    Ok(child.id())
}

/// Run `invocation` to completion and capture its output.
///
/// Blocks the calling thread; resources are released on every path,
/// including spawn failure.
pub fn launch_captured(invocation: &ResolvedInvocation) -> Result<CapturedOutput, LaunchError> {
    let program = invocation.program();
    let output = Command::new(&program)
        .args(invocation.argv())
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| LaunchError::SpawnFailed {
            executable: program,
            source,
        })?;
    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

/// Open `path` with the platform's default handler, detached.
///
/// Used as the ignore-editor fallback when no editor is configured.
pub fn open_with_default_handler(path: &Path) -> Result<(), LaunchError> {
    open::that_detached(path).map_err(|source| LaunchError::SpawnFailed {
        executable: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(executable: &str, arguments: &str, dir: &Path) -> ResolvedInvocation {
        ResolvedInvocation {
            executable: executable.to_string(),
            arguments: arguments.to_string(),
            working_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn argv_splits_shell_style() {
        let dir = std::env::temp_dir();
        let inv = invocation("tool", " --diff \"a file.txt\" b.txt", &dir);
        assert_eq!(inv.argv(), vec!["--diff", "a file.txt", "b.txt"]);
    }

    #[test]
    fn argv_of_empty_arguments_is_empty() {
        let dir = std::env::temp_dir();
        let inv = invocation("tool", "", &dir);
        assert!(inv.argv().is_empty());
    }

    #[test]
    fn program_strips_quotes() {
        let dir = std::env::temp_dir();
        let inv = invocation("\"my tool\"", "", &dir);
        assert_eq!(inv.program(), "my tool");
    }

    #[test]
    fn working_dir_requires_some_anchor() {
        let repo = RepoState::default();
        assert!(matches!(
            working_dir_for(&repo),
            Err(LaunchError::NoWorkingDirectory)
        ));
    }

    #[test]
    fn missing_executable_is_a_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let inv = invocation("/no/such/executable-xyz", "", dir.path());
        let err = launch_detached(&inv).unwrap_err();
        assert!(matches!(err, LaunchError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn captured_run_returns_output_and_code() {
        let dir = tempfile::tempdir().unwrap();
        let inv = invocation("/bin/sh", " -c \"echo out; echo err 1>&2; exit 3\"", dir.path());
        let captured = launch_captured(&inv).unwrap();
        assert_eq!(captured.stdout.trim(), "out");
        assert_eq!(captured.stderr.trim(), "err");
        assert_eq!(captured.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn detached_launch_returns_a_pid() {
        let dir = tempfile::tempdir().unwrap();
        let inv = invocation("/bin/sh", " -c \"exit 0\"", dir.path());
        let pid = launch_detached(&inv).unwrap();
        assert!(pid > 0);
    }
}

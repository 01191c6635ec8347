//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Opens a session (scan repository state, load settings, build the
//!    provider)
//! 2. Queries or invokes through the provider
//! 3. Formats and displays output
//!
//! Handlers never reach around the provider to launch anything directly.

mod completion;
mod run;
mod status;
mod tools_cmd;

pub use completion::completion;
pub use run::run;
pub use status::status;
pub use tools_cmd::tools;

use std::path::Path;

use anyhow::{Context as _, Result};

use super::args::Command;
use super::Context;
use crate::config;
use crate::provider::CommandProvider;
use crate::repo::RepoState;
use crate::tools::ToolSnapshot;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Status {
            json,
            file,
            workspace,
        } => status(ctx, json, file.as_deref(), workspace.as_deref()),
        Command::Run {
            command,
            file,
            workspace,
            baseline,
            modified,
            dry_run,
        } => run(
            ctx,
            &command,
            file.as_deref(),
            workspace.as_deref(),
            baseline,
            modified,
            dry_run,
        ),
        Command::Tools { json } => tools(ctx, json),
        Command::Completion { shell } => completion(shell),
    }
}

/// Everything a handler needs for one query or invocation sweep.
pub(crate) struct Session {
    pub provider: CommandProvider,
    pub repo: RepoState,
    pub tools: ToolSnapshot,
}

/// Scan state, load settings, and build the provider, mirroring the
/// sequence a host shell runs per idle tick.
pub(crate) fn open_session(
    ctx: &Context,
    selected_file: Option<&Path>,
    workspace_file: Option<&Path>,
) -> Result<Session> {
    let start = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let state = RepoState::scan(&start, selected_file, workspace_file)
        .context("failed to scan repository state")?;

    let loaded = config::load(state.git_dir.as_deref()).context("failed to load settings")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }

    let catalog = config::catalog_from(&loaded.settings)?;
    let provider =
        CommandProvider::new(catalog, loaded.settings.tools.clone()).with_active(ctx.active);
    let tools = provider.tool_snapshot();
    let repo = state.with_git_tool(tools.git.usable());

    Ok(Session {
        provider,
        repo,
        tools,
    })
}

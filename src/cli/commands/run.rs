//! run command - Invoke one provider command

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::catalog::{CommandGroup, CommandId, FixedCommand};
use crate::cli::commands::open_session;
use crate::cli::Context;
use crate::provider::{Invocation, InvokeContext, Invoked};
use crate::ui::output;

/// Invoke `command` the way the host shell would: availability first,
/// then resolution and dispatch.
#[allow(clippy::too_many_arguments)]
pub fn run(
    ctx: &Context,
    command: &str,
    file: Option<&Path>,
    workspace: Option<&Path>,
    baseline: Option<PathBuf>,
    modified: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let session = open_session(ctx, file, workspace)?;
    let id = parse_command_ref(command)?;

    let verdict = session
        .provider
        .query_status(id, &session.repo, &session.tools);
    if !verdict.is_supported() {
        bail!("command '{command}' ({id}) is not handled by this provider");
    }
    if !verdict.is_enabled() {
        bail!("command '{command}' ({id}) is not available in the current state");
    }

    let invoke_ctx = InvokeContext {
        baseline,
        modified: modified.or_else(|| file.map(Path::to_path_buf)),
    };

    if dry_run {
        let plan = session
            .provider
            .plan_invocation(id, &session.repo, &session.tools, &invoke_ctx)?;
        match plan {
            Invocation::Launch(invocation) => {
                output::print(format!("would launch: {invocation}"), ctx.verbosity());
                output::print(
                    format!("          in: {}", invocation.working_dir.display()),
                    ctx.verbosity(),
                );
            }
            Invocation::EditFile(path) => {
                output::print(
                    format!("would edit: {}", path.display()),
                    ctx.verbosity(),
                );
            }
            Invocation::Host(action) => {
                output::print(format!("host action: {action}"), ctx.verbosity());
            }
        }
        return Ok(());
    }

    match session
        .provider
        .invoke(id, &session.repo, &session.tools, &invoke_ctx)?
    {
        Invoked::Launched { pid, invocation } => {
            output::print(
                format!("launched {} (pid {pid})", invocation.program()),
                ctx.verbosity(),
            );
        }
        Invoked::Opened(path) => {
            output::print(format!("opened {}", path.display()), ctx.verbosity());
        }
        Invoked::Host(action) => {
            // This driver has no tool windows; name the effect instead.
            output::print(format!("host action: {action}"), ctx.verbosity());
        }
    }
    Ok(())
}

/// Parse a command reference: a fixed command name, `group:index`, or a
/// raw numeric id (decimal or 0x-prefixed hex).
fn parse_command_ref(raw: &str) -> Result<CommandId> {
    if let Some(cmd) = FixedCommand::from_name(raw) {
        return Ok(cmd.id());
    }

    if let Some((group, index)) = raw.split_once(':') {
        let group = match group {
            "ext" | "extension" => CommandGroup::ExtensionTool,
            "gui" | "alternate" => CommandGroup::AlternateGui,
            "ignore" => CommandGroup::IgnoreEditor,
            other => bail!("unknown command group '{other}' (ext, gui, ignore)"),
        };
        let index: u32 = index
            .parse()
            .map_err(|_| anyhow!("invalid index '{index}' in '{raw}'"))?;
        if index >= group.capacity() {
            bail!("index {index} is outside the {group} range");
        }
        return Ok(CommandId::new(group.base().as_u32() + index));
    }

    let parsed = if let Some(hex) = raw.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    };
    parsed
        .map(CommandId::new)
        .ok_or_else(|| anyhow!("unknown command '{raw}'; see 'tg status' for names"))
}

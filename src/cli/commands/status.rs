//! status command - One full availability sweep

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::catalog::{CommandCatalog, CommandId, Resolved};
use crate::cli::commands::open_session;
use crate::cli::Context;
use crate::provider::CommandStatus;
use crate::ui::output;

/// One row of the availability report.
#[derive(Debug, Serialize)]
struct StatusRow {
    id: u32,
    name: String,
    supported: bool,
    visible: bool,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl StatusRow {
    fn state(&self) -> &'static str {
        match (self.supported, self.visible, self.enabled) {
            (false, ..) => "not-supported",
            (true, false, _) => "hidden",
            (true, true, false) => "disabled",
            (true, true, true) => "enabled",
        }
    }
}

/// Query availability for every id the catalog answers for and print the
/// result.
pub fn status(
    ctx: &Context,
    json: bool,
    file: Option<&Path>,
    workspace: Option<&Path>,
) -> Result<()> {
    let session = open_session(ctx, file, workspace)?;

    let rows: Vec<StatusRow> = session
        .provider
        .catalog()
        .known_ids()
        .map(|id| {
            let verdict = session
                .provider
                .query_status(id, &session.repo, &session.tools);
            to_row(session.provider.catalog(), id, verdict)
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    output::debug(
        format!(
            "repository: {}, branch: {}",
            session.repo.is_git_repository,
            session.repo.current_branch.as_deref().unwrap_or("-")
        ),
        ctx.verbosity(),
    );
    for row in &rows {
        let label = row.label.as_deref().unwrap_or("");
        output::print(
            format!(
                "{:>8}  {:<20} {:<13} {}",
                format!("{:#06x}", row.id),
                row.name,
                row.state(),
                label
            ),
            ctx.verbosity(),
        );
    }
    Ok(())
}

fn to_row(catalog: &CommandCatalog, id: CommandId, verdict: CommandStatus) -> StatusRow {
    let name = match catalog.resolve(id) {
        Resolved::Fixed(cmd) => cmd.name().to_string(),
        Resolved::Dynamic { group, index, .. } => format!("{group}:{index}"),
        Resolved::NotFound => "?".to_string(),
    };
    match verdict {
        CommandStatus::NotSupported => StatusRow {
            id: id.as_u32(),
            name,
            supported: false,
            visible: false,
            enabled: false,
            label: None,
        },
        CommandStatus::Supported {
            visible,
            enabled,
            label,
        } => StatusRow {
            id: id.as_u32(),
            name,
            supported: true,
            visible,
            enabled,
            label,
        },
    }
}

//! tools command - Show configured external tools

use anyhow::Result;
use serde::Serialize;

use crate::cli::commands::open_session;
use crate::cli::Context;
use crate::tools::ToolFacts;
use crate::ui::output;

/// One row of the tool report.
#[derive(Debug, Serialize)]
struct ToolRow {
    tool: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    exists: bool,
    expand_inline: bool,
}

impl ToolRow {
    fn from_facts(tool: &'static str, facts: &ToolFacts) -> Self {
        Self {
            tool,
            path: facts.path.as_ref().map(|p| p.display().to_string()),
            exists: facts.exists,
            expand_inline: facts.expand_inline,
        }
    }
}

/// Print the configured tools and whether each is present on disk.
pub fn tools(ctx: &Context, json: bool) -> Result<()> {
    let session = open_session(ctx, None, None)?;
    let snapshot = &session.tools;

    let rows = vec![
        ToolRow::from_facts("git", &snapshot.git),
        ToolRow::from_facts("shell", &snapshot.shell),
        ToolRow::from_facts("editor", &snapshot.editor),
        ToolRow::from_facts("extension-gui", &snapshot.extension_gui),
        ToolRow::from_facts("alternate-gui", &snapshot.alternate_gui),
    ];

    if json {
        #[derive(Serialize)]
        struct Report<'a> {
            tools: &'a [ToolRow],
            #[serde(skip_serializing_if = "Option::is_none")]
            diff_template: Option<&'a str>,
        }
        let report = Report {
            tools: &rows,
            diff_template: snapshot.diff_template.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for row in &rows {
        let presence = match (&row.path, row.exists) {
            (None, _) => "not configured".to_string(),
            (Some(path), true) => path.clone(),
            (Some(path), false) => format!("{path} (missing)"),
        };
        let expand = if row.expand_inline { "  [expanded]" } else { "" };
        output::print(
            format!("{:<14} {presence}{expand}", row.tool),
            ctx.verbosity(),
        );
    }
    match &snapshot.diff_template {
        Some(template) => output::print(format!("{:<14} {template}", "diff"), ctx.verbosity()),
        None => output::print(format!("{:<14} not configured", "diff"), ctx.verbosity()),
    }
    Ok(())
}

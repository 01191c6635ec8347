//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Toolgate - command availability and external-tool dispatch for git
/// source-control integrations
#[derive(Parser, Debug)]
#[command(name = "tg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tg was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Answer queries as an inactive provider (every command hidden)
    #[arg(long, global = true, hide = true)]
    pub inactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show availability of every command the provider answers for
    #[command(
        long_about = "Show availability of every command the provider answers for.\n\n\
            Runs one full availability sweep, the same query the host shell \
            issues per idle tick: every fixed command and every populated \
            dynamic slot is evaluated against the current repository state \
            and tool configuration."
    )]
    Status {
        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,

        /// Treat this file as the host's current selection
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Workspace descriptor file (working-directory fallback)
        #[arg(long, value_name = "PATH")]
        workspace: Option<PathBuf>,
    },

    /// Invoke a command by name, id, or group:index
    #[command(
        long_about = "Invoke a command by name, id, or group:index.\n\n\
            Fixed commands go by name (refresh, shell, compare, ...). Dynamic \
            entries go by group and position: ext:0, gui:2, ignore:0. A raw \
            numeric id (decimal or 0x-prefixed hex) is accepted as the host \
            shell would send it.",
        after_help = "\
EXAMPLES:
    # Open a shell in the repository working directory
    tg run shell

    # Diff a file against a baseline produced elsewhere
    tg run compare --file src/lib.rs --baseline /tmp/lib.rs.HEAD

    # Second entry of the expanded alternate-GUI list
    tg run gui:1

    # Show what would launch, without launching
    tg run ext:0 --dry-run"
    )]
    Run {
        /// Command to invoke: a name, a raw id, or group:index
        command: String,

        /// Treat this file as the host's current selection
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Workspace descriptor file (working-directory fallback)
        #[arg(long, value_name = "PATH")]
        workspace: Option<PathBuf>,

        /// Baseline file substituted for $LOCAL in diff templates
        #[arg(long, value_name = "PATH")]
        baseline: Option<PathBuf>,

        /// Modified file substituted for $REMOTE (defaults to --file)
        #[arg(long, value_name = "PATH")]
        modified: Option<PathBuf>,

        /// Print the planned invocation instead of performing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the configured external tools and whether they are present
    Tools {
        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shells supported for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

//! cli
//!
//! The host-driver command line for Toolgate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Play the host shell's role: scan state, sweep availability, invoke
//! - Does NOT own any provider logic; everything flows through
//!   [`crate::provider`]

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Flags shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to operate from; defaults to the process cwd.
    pub cwd: Option<std::path::PathBuf>,
    /// Minimal output.
    pub quiet: bool,
    /// Verbose output.
    pub debug: bool,
    /// Master provider-active flag.
    pub active: bool,
}

impl Context {
    /// The verbosity level implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        quiet: cli.quiet,
        debug: cli.debug,
        active: !cli.inactive,
    };

    commands::dispatch(cli.command, &ctx)
}

//! Toolgate binary entry point.
//!
//! All logic lives in the library; this shim parses the CLI and reports
//! top-level failures.

use std::process::ExitCode;

fn main() -> ExitCode {
    match toolgate::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            toolgate::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

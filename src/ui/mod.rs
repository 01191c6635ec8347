//! ui
//!
//! User interaction utilities for the host-driver binary.

pub mod output;

pub use output::{error, Verbosity};

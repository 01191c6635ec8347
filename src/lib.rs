//! Toolgate - command availability and external-tool dispatch for git
//! source-control integrations
//!
//! Toolgate is the command-dispatch core a host shell (an IDE, an editor
//! plugin, a TUI) embeds to expose git tooling as user-invocable commands.
//! Given the live state of a tracked repository and a set of configured
//! external tools (diff viewer, shell, extension GUIs, ignore-file editors),
//! it decides for every command whether it is visible, enabled, and how it is
//! labeled, and on invocation resolves the command into an executable plus
//! argument string and launches it as a detached process.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Host-driver command line (parses args, delegates to provider)
//! - [`provider`] - Availability evaluation and invocation planning
//! - [`catalog`] - Fixed command table plus dynamic command groups with
//!   reserved id ranges
//! - [`repo`] - Read-only repository state snapshots (via git2)
//! - [`tools`] - External tool configuration snapshots
//! - [`launch`] - Template resolution, quote-aware tokenization, and
//!   process dispatch
//! - [`config`] - Settings loading (global and per-repository)
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Toolgate maintains the following invariants:
//!
//! 1. Availability queries are pure reads: no mutation, no process launches
//! 2. Dynamic command id ranges never overlap; id-to-group mapping is
//!    arithmetic, never stateful
//! 3. "Not supported" and "hidden" are never conflated in query results
//! 4. No failure in the core is fatal to the host process

pub mod catalog;
pub mod cli;
pub mod config;
pub mod launch;
pub mod provider;
pub mod repo;
pub mod tools;
pub mod ui;

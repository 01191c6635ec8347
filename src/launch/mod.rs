//! launch
//!
//! Command resolution and process dispatch.
//!
//! [`resolve`] turns a configured command template into an executable token
//! plus argument string; [`spawn`] turns that into a running process. The
//! two halves are kept separate so the invocation planner can be tested
//! without ever launching anything.

pub mod resolve;
pub mod spawn;

pub use resolve::{resolve_command, split_leading_token, substitute, unquote, ResolveError};
pub use spawn::{
    launch_captured, launch_detached, open_with_default_handler, working_dir_for,
    CapturedOutput, LaunchError, ResolvedInvocation,
};

//! CLI domain: parse and route only.
//! The `run` command hosts a session log the way a dedicated server would.

mod parse;
mod route;

pub use parse::{Cli, Commands, RunArgs};
pub use route::{apply_overrides, RunContext};

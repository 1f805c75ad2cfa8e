//! CLI domain: parse, route, and output only.
//! Route handlers are thin; the manifest library does the work.

mod output;
mod parse;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, ModeCommands, SpecialFlagArg};
pub use route::RunContext;

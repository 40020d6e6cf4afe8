// server/src/cli/mod.rs

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::{resolve_config, run, start_cli};
pub use commands::{CliArgs, FilterArgs, TrialDashCommands};

pub mod commands;
pub mod input;

pub use commands::{AudioCommands, Cli, Commands, ConfigCommands, PlanCommands};

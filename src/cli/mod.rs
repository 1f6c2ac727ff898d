//! CLI module for clasificar
//!
//! This module contains all CLI command handlers and utilities.

mod commands;
mod logging;

pub use commands::{run_command, Cli, Command, InspectArgs, VocabArgs};
pub use logging::LogLevel;

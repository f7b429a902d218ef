//! CLI module for the plan provisioning tool.
//!
//! This module provides the command-line interface and the formatting of
//! run results.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;

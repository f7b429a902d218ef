//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Environment;

/// Provision TradeFlow subscription plans in Razorpay.
#[derive(Parser, Debug)]
#[command(name = "tradeflow-plans")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// AWS region of the parameter store.
    #[arg(long, global = true, env = "TRADEFLOW_AWS_REGION")]
    pub region: Option<String>,

    /// Env file to load instead of `./.env`.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create missing plans and store every plan ID.
    Run {
        /// Target environment.
        #[arg(value_enum, ignore_case = true)]
        environment: Environment,
    },

    /// Show which plans would be created, without changing anything.
    Plan {
        /// Target environment.
        #[arg(value_enum, ignore_case = true)]
        environment: Environment,
    },

    /// Show the plan IDs currently stored in the parameter store.
    Status {
        /// Target environment.
        #[arg(value_enum, ignore_case = true)]
        environment: Environment,
    },
}

impl Commands {
    /// Returns the environment the command targets.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        match self {
            Self::Run { environment } | Self::Plan { environment } | Self::Status { environment } => {
                *environment
            }
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

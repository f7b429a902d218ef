//! Plan provisioning CLI entrypoint.
//!
//! This is the main entrypoint for the tradeflow-plans command-line tool.

use std::process::ExitCode;

use tradeflow_plans::cli::{Cli, Commands, OutputFormatter};
use tradeflow_plans::config::{Environment, PLAN_CATALOG, Settings, load_dotenv};
use tradeflow_plans::error::Result;
use tradeflow_plans::reconciler::{Reconciler, parameter_status};
use tradeflow_plans::store::SsmParameterStore;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default of 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point. Returns whether the command achieved its effect.
async fn run(cli: Cli) -> Result<bool> {
    load_dotenv(cli.env_file.as_deref())?;

    let settings = Settings::from_env()?.with_region(cli.region);
    let formatter = OutputFormatter::new(cli.output);
    debug!("Settings: {settings:?}");

    let environment = cli.command.environment();
    match cli.command {
        Commands::Run { .. } => cmd_run(&settings, environment, &formatter).await,
        Commands::Plan { .. } => cmd_plan(&settings, environment, &formatter).await,
        Commands::Status { .. } => cmd_status(&settings, environment, &formatter).await,
    }
}

/// Create missing plans and store every plan ID.
async fn cmd_run(
    settings: &Settings,
    environment: Environment,
    formatter: &OutputFormatter,
) -> Result<bool> {
    // Credentials are checked before anything talks to Razorpay or AWS.
    let reconciler = Reconciler::connect(settings, environment, env_lookup)?;
    let store = SsmParameterStore::new(settings.region.as_deref()).await;

    let summary = reconciler.reconcile(&store).await;

    eprintln!("{}", formatter.format_summary(&summary));
    Ok(summary.is_success())
}

/// Show what a run would change.
async fn cmd_plan(
    settings: &Settings,
    environment: Environment,
    formatter: &OutputFormatter,
) -> Result<bool> {
    let reconciler = Reconciler::connect(settings, environment, env_lookup)?;
    let preview = reconciler.preview().await?;

    eprintln!("{}", formatter.format_preview(&preview));
    Ok(true)
}

/// Show the stored plan IDs.
async fn cmd_status(
    settings: &Settings,
    environment: Environment,
    formatter: &OutputFormatter,
) -> Result<bool> {
    let store = SsmParameterStore::new(settings.region.as_deref()).await;
    let statuses = parameter_status(&store, &settings.product, environment, PLAN_CATALOG).await;

    eprintln!("{}", formatter.format_status(&statuses));
    Ok(statuses.iter().all(|s| s.error.is_none()))
}

/// Reads a variable from the process environment.
fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
mod commands;
mod context;
mod template;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use user_disable::UserDisableConfig;

/// Disable a Microsoft Entra ID account, or drive the `error`/`halt` handlers by hand
#[derive(Parser)]
#[command(name = "user-disable")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace); `RUST_LOG` takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Disable the account
    Invoke(commands::InvokeArgs),
    /// Classify a previous failure as retryable or fatal
    Error(commands::ErrorArgs),
    /// Report that the job was halted
    Halt(commands::HaltArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = UserDisableConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Invoke(args) => args.run(&config).await,
        Commands::Error(args) => args.run(&config).await,
        Commands::Halt(args) => args.run(&config).await,
    }
}

/// Logs go to stderr; stdout carries only the JSON result.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

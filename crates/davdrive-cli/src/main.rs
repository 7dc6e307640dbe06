//! davdrive CLI - Command-line interface for davdrive
//!
//! Provides commands for:
//! - Enqueueing file uploads to the sync server
//! - Managing the passcode app lock

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use davdrive_core::config::Config;

mod accounts;
mod commands;

use commands::{lock::LockCommand, upload::UploadCommand};

#[derive(Debug, Parser)]
#[command(name = "davdrive", version, about = "Self-hosted file sync client")]
pub struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a local file to the sync server
    Upload(UploadCommand),
    /// Manage the passcode app lock
    #[command(subcommand)]
    Lock(LockCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Commands::Upload(cmd) => cmd.execute(&config).await,
        Commands::Lock(cmd) => cmd.execute(&config),
    }
}

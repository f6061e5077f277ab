//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for billsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// billsync - clinical encounter billing reconciliation
#[derive(Parser, Debug)]
#[command(name = "billsync")]
#[command(version, about, long_about = None)]
#[command(author = "Billsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "billsync.toml", env = "BILLSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BILLSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile one encounter extract against the billing rules
    Run(commands::run::RunArgs),

    /// Show the current missing-ledger contents
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Generate a sample encounter extract
    Sample(commands::sample::SampleArgs),
}

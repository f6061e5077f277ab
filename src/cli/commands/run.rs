//! Run command implementation
//!
//! This module implements the `run` command: one full reconciliation of an
//! encounter extract against the billing rules and the missing ledger.

use crate::config::load_config;
use crate::core::run::RunCoordinator;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the encounter extract workbook
    pub input: PathBuf,

    /// Previous ledger file (default: newest ledger in the configured folder)
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Override the run date stamped into file names and ledger rows
    #[arg(long, value_name = "DATE")]
    pub run_date: Option<String>,

    /// Dry run mode - evaluate and reconcile without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if !self.input.exists() {
            eprintln!("Input file not found: {}", self.input.display());
            return Ok(2);
        }

        let coordinator = RunCoordinator::new(config);
        let summary = coordinator.execute(
            &self.input,
            self.ledger.as_deref(),
            self.run_date.as_deref(),
        )?;

        println!("✅ Reconciliation complete");
        println!(
            "   Encounters: {} ({} rows skipped)",
            summary.total_encounters, summary.row_defects
        );
        println!(
            "   Billed: {} | Not billed: {} ({:.1}% success)",
            summary.billed_count,
            summary.not_billed_count,
            summary.success_rate()
        );
        println!(
            "   Ledger: {} entries (added {}, updated {}, removed {})",
            summary.ledger_total,
            summary.ledger_stats.added,
            summary.ledger_stats.updated,
            summary.ledger_stats.removed
        );
        match (&summary.report_file, &summary.ledger_file) {
            (Some(report), Some(ledger)) => {
                println!("   Report: {}", report.display());
                println!("   Ledger file: {}", ledger.display());
            }
            _ if summary.dry_run => println!("   Dry run: no files written"),
            _ => {}
        }

        Ok(0)
    }
}

//! Status command implementation
//!
//! This module implements the `status` command for displaying the current
//! missing-ledger contents.

use crate::adapters::LedgerStore;
use crate::config::load_config;
use clap::Args;
use std::collections::BTreeMap;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Filter entries by facility
    #[arg(long)]
    pub facility: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking ledger status");

        println!("📊 Missing Ledger Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let store = LedgerStore::new(config.ledger.folder_path, config.ledger.file_pattern);

        let latest = match store.find_latest() {
            Some(path) => path,
            None => {
                println!("No ledger file found - nothing is awaiting billing");
                return Ok(0);
            }
        };

        let ledger = match store.try_load(&latest) {
            Ok(ledger) => ledger,
            Err(e) => {
                println!("❌ Failed to read ledger file {}", latest.display());
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let entries: Vec<_> = ledger
            .iter()
            .filter(|entry| match &self.facility {
                Some(facility) => entry.facility.eq_ignore_ascii_case(facility),
                None => true,
            })
            .collect();

        println!("File: {}", latest.display());
        println!("Entries: {}", entries.len());
        println!();

        let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in &entries {
            *by_reason.entry(entry.reason.as_str()).or_default() += 1;
        }

        if !by_reason.is_empty() {
            println!("By reason:");
            for (reason, count) in by_reason {
                let reason = if reason.is_empty() { "(none)" } else { reason };
                println!("  {reason}: {count}");
            }
        }

        Ok(0)
    }
}

//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the billsync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing, so a successful load means a
        // valid configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Input Sheet: {}", config.input.sheet_name);
        println!("  Output Folder: {}", config.output.folder_path);
        println!("  Report Pattern: {}", config.output.report_file_pattern);
        println!("  Ledger Folder: {}", config.ledger.folder_path);
        println!("  Ledger Pattern: {}", config.ledger.file_pattern);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("enabled ({})", config.logging.local_path)
            } else {
                "disabled".to_string()
            }
        );

        Ok(0)
    }
}

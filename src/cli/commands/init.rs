//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "billsync.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing billsync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your folder paths", self.output);
                println!("  2. Generate a sample extract: billsync sample");
                println!("  3. Reconcile it: billsync run <extract.xlsx>");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to create configuration file: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"[application]
log_level = "info"

[input]
sheet_name = "Sheet1"

[output]
folder_path = "data/output"

[ledger]
folder_path = "data/output"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# billsync configuration

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Evaluate and reconcile without writing any files
dry_run = false

[input]
# Worksheet the extract rows live on (falls back to the first sheet)
sheet_name = "Sheet1"

[output]
# Reconciliation reports are written here
folder_path = "data/output"
# {date} is replaced with the run date
report_file_pattern = "General Reconciliation {date}.xlsx"
# strftime format for the run date
date_format = "%m-%d-%Y"

[ledger]
# Missing-ledger files are discovered in and written to this folder
folder_path = "data/output"
file_pattern = "Master Missing to {date}.xlsx"

[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

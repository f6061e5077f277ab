//! Configuration schema types
//!
//! This module defines the configuration structure for billsync.

use serde::{Deserialize, Serialize};

/// Main billsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillsyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input extract settings
    #[serde(default)]
    pub input: InputConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Missing-ledger settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BillsyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.ledger.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for BillsyncConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            ledger: LedgerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (evaluate and reconcile but write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Input extract configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Worksheet name to read (falls back to the first sheet)
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sheet_name.trim().is_empty() {
            return Err("input.sheet_name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder reconciliation reports are written to
    #[serde(default = "default_output_folder")]
    pub folder_path: String,

    /// Report file name; `{date}` is replaced with the run date
    #[serde(default = "default_report_pattern")]
    pub report_file_pattern: String,

    /// strftime format for the run date stamped into file names and the
    /// ledger's last-attempt column
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.report_file_pattern.contains("{date}") {
            return Err(
                "output.report_file_pattern must contain the {date} placeholder".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder_path: default_output_folder(),
            report_file_pattern: default_report_pattern(),
            date_format: default_date_format(),
        }
    }
}

/// Missing-ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Folder ledger files are discovered in and written to
    #[serde(default = "default_output_folder")]
    pub folder_path: String,

    /// Ledger file name; `{date}` is replaced with the run date
    #[serde(default = "default_ledger_pattern")]
    pub file_pattern: String,
}

impl LedgerConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.file_pattern.contains("{date}") {
            return Err("ledger.file_pattern must contain the {date} placeholder".to_string());
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            folder_path: default_output_folder(),
            file_pattern: default_ledger_pattern(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_output_folder() -> String {
    "data/output".to_string()
}

fn default_report_pattern() -> String {
    "General Reconciliation {date}.xlsx".to_string()
}

fn default_ledger_pattern() -> String {
    "Master Missing to {date}.xlsx".to_string()
}

fn default_date_format() -> String {
    "%m-%d-%Y".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

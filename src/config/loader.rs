//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BillsyncConfig;
use crate::domain::errors::BillsyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BillsyncConfig
/// 4. Applies environment variable overrides (BILLSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use billsync::config::loader::load_config;
///
/// let config = load_config("billsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BillsyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BillsyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BillsyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BillsyncConfig = toml::from_str(&contents)
        .map_err(|e| BillsyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        BillsyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BillsyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the BILLSYNC_* prefix
///
/// Environment variables follow the pattern: BILLSYNC_<SECTION>_<KEY>
/// For example: BILLSYNC_INPUT_SHEET_NAME, BILLSYNC_OUTPUT_FOLDER_PATH
fn apply_env_overrides(config: &mut BillsyncConfig) {
    if let Ok(val) = std::env::var("BILLSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("BILLSYNC_INPUT_SHEET_NAME") {
        config.input.sheet_name = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_OUTPUT_FOLDER_PATH") {
        config.output.folder_path = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_OUTPUT_REPORT_FILE_PATTERN") {
        config.output.report_file_pattern = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_OUTPUT_DATE_FORMAT") {
        config.output.date_format = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_LEDGER_FOLDER_PATH") {
        config.ledger.folder_path = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_LEDGER_FILE_PATTERN") {
        config.ledger.file_pattern = val;
    }
    if let Ok(val) = std::env::var("BILLSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("BILLSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

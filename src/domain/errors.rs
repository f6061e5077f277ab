//! Domain error types
//!
//! This module defines the error hierarchy for billsync. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main billsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum BillsyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record-source errors (input extract reading)
    #[error("Record source error: {0}")]
    Source(#[from] SourceError),

    /// Ledger store errors (missing-ledger reading and writing)
    #[error("Ledger store error: {0}")]
    LedgerStore(String),

    /// Report sink errors (reconciliation report writing)
    #[error("Report error: {0}")]
    Report(String),

    /// Reconciliation process errors
    #[error("Reconciliation error: {0}")]
    Reconciliation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Record-source-specific errors
///
/// Errors that occur while reading an input extract. Row-level defects are
/// not errors - they are collected and logged by the source adapter - so
/// every variant here is fatal for the run.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required columns absent from the header row
    ///
    /// Carries every missing column so the defect is reported once,
    /// completely.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// The missing column names, in required order
        columns: Vec<String>,
    },

    /// The selected sheet has no rows at all
    #[error("sheet '{0}' is empty")]
    EmptySheet(String),

    /// The workbook could not be opened or read
    #[error("failed to read workbook: {0}")]
    Workbook(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for BillsyncError {
    fn from(err: std::io::Error) -> Self {
        BillsyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BillsyncError {
    fn from(err: serde_json::Error) -> Self {
        BillsyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BillsyncError {
    fn from(err: toml::de::Error) -> Self {
        BillsyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from workbook-writer errors
impl From<rust_xlsxwriter::XlsxError> for BillsyncError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        BillsyncError::Report(err.to_string())
    }
}

//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use billsync::logging::init_logging;
//! use billsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

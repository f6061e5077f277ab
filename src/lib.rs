// billsync - clinical encounter billing reconciliation
// Copyright (c) 2025 Billsync Contributors
// Licensed under the MIT License

//! # billsync - encounter billing reconciliation
//!
//! billsync reconciles daily clinical-encounter extracts against a billing
//! evaluation oracle and maintains a cross-run ledger of encounters that
//! have never billed successfully.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** encounter extracts into a fixed record shape
//! - **Deriving** a stable, formatting-insensitive identity per encounter
//! - **Evaluating** billing rules with a closed set of denial reasons
//! - **Reconciling** outcomes into the persisted missing ledger
//! - **Aggregating** billed encounters for the summary report
//!
//! ## Architecture
//!
//! billsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (evaluation, reconciliation, aggregation)
//! - [`adapters`] - File integrations (extract reader, report writer,
//!   ledger store)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use billsync::core::run::RunCoordinator;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = billsync::config::load_config("billsync.toml")?;
//!     let coordinator = RunCoordinator::new(config);
//!     let summary = coordinator.execute(Path::new("extract.xlsx"), None, None)?;
//!     println!("Billed {} of {}", summary.billed_count, summary.total_encounters);
//!     Ok(())
//! }
//! ```
//!
//! ## Identity derivation
//!
//! The join key between a day's records and the ledger is a SHA-256 digest
//! over normalized identifying fields:
//!
//! ```rust
//! use billsync::domain::{Encounter, EncounterKey};
//!
//! let a = Encounter {
//!     patient_name: "Doe, Jane".to_string(),
//!     date_of_service: "12-09-2025".to_string(),
//!     ..Default::default()
//! };
//! let b = Encounter {
//!     patient_name: "  DOE,  JANE ".to_string(),
//!     date_of_service: "2025-12-09".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(
//!     EncounterKey::from_encounter(&a),
//!     EncounterKey::from_encounter(&b)
//! );
//! ```
//!
//! ## Error Handling
//!
//! billsync uses the [`domain::BillsyncError`] type for all errors:
//!
//! ```rust,no_run
//! use billsync::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = billsync::config::load_config("billsync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

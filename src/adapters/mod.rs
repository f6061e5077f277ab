//! External integrations
//!
//! Adapters own every file format and folder convention so the core stays
//! free of I/O concerns:
//!
//! - [`xlsx::source`] - reads daily encounter extracts into the fixed
//!   record shape
//! - [`xlsx::report`] - writes the two-sheet reconciliation report
//! - [`ledger`] - loads and saves the persisted missing ledger

pub mod ledger;
pub mod xlsx;

pub use ledger::LedgerStore;
pub use xlsx::source::{ExtractReader, ParsedExtract, RowDefect, REQUIRED_COLUMNS};

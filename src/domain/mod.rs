//! Domain models and types for billsync.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The encounter record** ([`Encounter`]) - one clinical visit in the
//!   fixed shape produced by the record-source boundary
//! - **Identity derivation** ([`EncounterKey`]) - the stable, formatting-
//!   insensitive join key between a day's records and the persisted ledger
//! - **Evaluation outcomes** ([`BillingOutcome`], [`Disposition`],
//!   [`DenialReason`])
//! - **The missing ledger** ([`Ledger`], [`LedgerEntry`])
//! - **Error types** ([`BillsyncError`], [`SourceError`]) and the
//!   [`Result`] alias
//!
//! # Type Safety
//!
//! The encounter key uses the newtype pattern so raw strings cannot be
//! mistaken for identities:
//!
//! ```
//! use billsync::domain::{Encounter, EncounterKey};
//!
//! let key = EncounterKey::from_encounter(&Encounter::default());
//! // let wrong: EncounterKey = String::new();  // Compile error!
//! ```

pub mod encounter;
pub mod errors;
pub mod key;
pub mod ledger;
pub mod outcome;
pub mod result;

// Re-export commonly used types for convenience
pub use encounter::Encounter;
pub use errors::{BillsyncError, SourceError};
pub use key::EncounterKey;
pub use ledger::{Ledger, LedgerEntry, LEDGER_BILLED_FLAG};
pub use outcome::{BillingOutcome, DenialReason, Disposition};
pub use result::Result;

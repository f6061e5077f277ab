//! Core business logic
//!
//! This module contains the reconciliation engine:
//!
//! - [`evaluate`] - billing rule evaluation with instance-scoped claim ids
//! - [`ledger`] - multi-run reconciliation of the missing ledger
//! - [`aggregate`] - billed-encounter grouping for the Summary sheet
//! - [`run`] - the coordinator sequencing one full reconciliation run

pub mod aggregate;
pub mod evaluate;
pub mod ledger;
pub mod run;

pub use aggregate::{aggregate, SummaryGroup};
pub use evaluate::BillingEvaluator;
pub use ledger::{reconcile, ReconcileStats};
pub use run::{RunCoordinator, RunSummary};

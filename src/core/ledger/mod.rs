//! Ledger reconciliation
//!
//! This module merges a run's billing outcomes into the previously
//! persisted missing ledger, computing exact add/update/remove deltas.

pub mod reconciler;

pub use reconciler::{reconcile, ReconcileStats};

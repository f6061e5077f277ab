//! Billing evaluation outcomes
//!
//! This module defines the result of evaluating one encounter against the
//! billing rules: either billed with a claim identifier, or denied with a
//! reason from a closed set.

use super::key::EncounterKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason an encounter failed billing evaluation
///
/// The set is closed; the string forms are the exact values written to the
/// report and ledger files, so they must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenialReason {
    /// Diagnosis codes (assessment) missing
    MissingDx,
    /// Procedure code missing
    MissingCpt,
    /// Facility empty
    InvalidFacility,
    /// Servicing or supervising provider missing
    ProviderMismatch,
    /// No outcome was produced for the record; minted only by the reconciler
    Unknown,
}

impl DenialReason {
    /// Returns the wire string written to report and ledger files
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::MissingDx => "Missing DX",
            DenialReason::MissingCpt => "Missing CPT",
            DenialReason::InvalidFacility => "Invalid Facility",
            DenialReason::ProviderMismatch => "Provider Mismatch",
            DenialReason::Unknown => "Unknown Error",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Disposition of a billing evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Encounter billed successfully
    Billed {
        /// Claim identifier minted by the evaluator, unique within one run
        claim_id: String,
    },
    /// Encounter failed a billing rule
    Denied {
        /// First rule that fired
        reason: DenialReason,
    },
}

/// Result of evaluating one encounter
///
/// Exactly one outcome exists per input record, in the same order as the
/// input batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingOutcome {
    /// Identity of the evaluated encounter
    pub key: EncounterKey,

    /// Billed or denied
    pub disposition: Disposition,

    /// When the evaluation ran
    pub evaluated_at: DateTime<Utc>,
}

impl BillingOutcome {
    /// Returns true when the encounter billed successfully
    pub fn is_billed(&self) -> bool {
        matches!(self.disposition, Disposition::Billed { .. })
    }

    /// Returns the denial reason, if denied
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match &self.disposition {
            Disposition::Denied { reason } => Some(*reason),
            Disposition::Billed { .. } => None,
        }
    }

    /// Returns the claim identifier, if billed
    pub fn claim_id(&self) -> Option<&str> {
        match &self.disposition {
            Disposition::Billed { claim_id } => Some(claim_id),
            Disposition::Denied { .. } => None,
        }
    }
}

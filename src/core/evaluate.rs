//! Billing rule evaluation
//!
//! This module simulates the billing system's acceptance rules. Every
//! encounter maps to a defined outcome - there is no failure path - and the
//! checks fire first-match-wins in a fixed order, so an encounter missing
//! several fields is denied for the first rule only.

use crate::domain::{BillingOutcome, DenialReason, Disposition, Encounter, EncounterKey};
use chrono::Utc;

/// Evaluates encounters against the billing rules
///
/// Owns the claim-identifier sequence: claim ids are zero-padded,
/// monotonically increasing, and scoped to this evaluator instance. A new
/// run constructs a new evaluator, so claim ids restart each run and are
/// not globally unique.
#[derive(Debug, Default)]
pub struct BillingEvaluator {
    sequence: u64,
}

impl BillingEvaluator {
    /// Creates a new evaluator with a fresh claim sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evaluations performed so far
    pub fn calls(&self) -> u64 {
        self.sequence
    }

    /// Evaluates a single encounter
    ///
    /// Checks, in order: assessment (DX), CPT, facility, servicing
    /// provider, supervising provider. A field counts as missing when it is
    /// empty or whitespace-only. Encounters passing every check are billed
    /// and assigned the next claim id.
    pub fn evaluate(&mut self, encounter: &Encounter) -> BillingOutcome {
        self.sequence += 1;
        let key = EncounterKey::from_encounter(encounter);

        let denial = if encounter.assessment.trim().is_empty() {
            Some(DenialReason::MissingDx)
        } else if encounter.cpt.trim().is_empty() {
            Some(DenialReason::MissingCpt)
        } else if encounter.facility.trim().is_empty() {
            Some(DenialReason::InvalidFacility)
        } else if encounter.servicing_provider.trim().is_empty() {
            Some(DenialReason::ProviderMismatch)
        } else if encounter.supervising_provider.trim().is_empty() {
            Some(DenialReason::ProviderMismatch)
        } else {
            None
        };

        let disposition = match denial {
            Some(reason) => {
                tracing::debug!(
                    key = %key,
                    patient = %encounter.patient_name,
                    reason = %reason,
                    "Encounter denied"
                );
                Disposition::Denied { reason }
            }
            None => Disposition::Billed {
                claim_id: format!("CLAIM-{:06}", self.sequence),
            },
        };

        BillingOutcome {
            key,
            disposition,
            evaluated_at: Utc::now(),
        }
    }

    /// Evaluates a batch of encounters
    ///
    /// Returns one outcome per record in the same order as the input; no
    /// reordering, no deduplication.
    pub fn batch_evaluate(&mut self, encounters: &[Encounter]) -> Vec<BillingOutcome> {
        encounters.iter().map(|e| self.evaluate(e)).collect()
    }
}

//! Multi-run ledger reconciler
//!
//! Merges the current run's outcomes into the previous missing ledger.
//! Entries are added when a key first fails, refreshed (last-attempt date
//! and reason only) when it fails again, and removed the run it first
//! succeeds. Keys absent from the current batch carry forward untouched:
//! the ledger is a superset across time, not a snapshot of one run.

use crate::domain::{
    BillingOutcome, DenialReason, Encounter, EncounterKey, Ledger, LedgerEntry,
};
use std::collections::HashMap;

/// Exact deltas applied to the ledger by one reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Entries created for keys failing for the first time
    pub added: usize,

    /// Existing entries refreshed because their key failed again
    pub updated: usize,

    /// Entries removed because their key billed successfully
    pub removed: usize,
}

impl ReconcileStats {
    /// Log the deltas at info level
    pub fn log(&self) {
        tracing::info!(
            added = self.added,
            updated = self.updated,
            removed = self.removed,
            "Ledger reconciled"
        );
    }
}

/// Reconciles the current run against the previous ledger
///
/// The caller's `previous` ledger is never mutated; the updated ledger is
/// returned alongside exact [`ReconcileStats`]. Records are processed in
/// input order, which makes the result deterministic when several records
/// share a key.
///
/// A record without a matching outcome is treated as a failure with reason
/// "Unknown Error" rather than an error - the evaluator has no failure path
/// by construction, so an absent outcome is a wiring defect worth recording
/// in the ledger, not worth aborting the run.
///
/// Re-running with the same inputs against the already-updated ledger
/// yields `added = 0`, `removed = 0`, and `updated` equal to the number of
/// failing records.
pub fn reconcile(
    previous: &Ledger,
    records: &[Encounter],
    outcomes: &[BillingOutcome],
    run_date: &str,
) -> (Ledger, ReconcileStats) {
    let mut ledger = previous.clone();
    let mut stats = ReconcileStats::default();

    let outcome_by_key: HashMap<&EncounterKey, &BillingOutcome> =
        outcomes.iter().map(|o| (&o.key, o)).collect();

    for record in records {
        let key = EncounterKey::from_encounter(record);
        let outcome = outcome_by_key.get(&key).copied();

        match outcome {
            Some(outcome) if outcome.is_billed() => {
                if ledger.remove(&key).is_some() {
                    stats.removed += 1;
                    tracing::debug!(
                        key = %key,
                        patient = %record.patient_name,
                        "Removed from missing ledger"
                    );
                }
            }
            _ => {
                let reason = outcome
                    .and_then(|o| o.denial_reason())
                    .unwrap_or(DenialReason::Unknown);

                if let Some(entry) = ledger.get_mut(&key) {
                    // Refresh attempt metadata only; display fields stay as
                    // first recorded
                    entry.last_attempt = run_date.to_string();
                    entry.reason = reason.as_str().to_string();
                    stats.updated += 1;
                    tracing::debug!(
                        key = %key,
                        patient = %record.patient_name,
                        reason = %reason,
                        "Updated missing ledger entry"
                    );
                } else {
                    ledger.insert(LedgerEntry::from_encounter(record, reason.as_str(), run_date));
                    stats.added += 1;
                    tracing::debug!(
                        key = %key,
                        patient = %record.patient_name,
                        reason = %reason,
                        "Added to missing ledger"
                    );
                }
            }
        }
    }

    stats.log();
    (ledger, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluate::BillingEvaluator;

    fn encounter(patient: &str, cpt: &str, assessment: &str) -> Encounter {
        Encounter {
            patient_name: patient.to_string(),
            dob: "01-15-1950".to_string(),
            date_of_service: "12-09-2025".to_string(),
            type_of_care: "LTC".to_string(),
            type_of_visit: "New".to_string(),
            facility: "Hospital A".to_string(),
            assessment: assessment.to_string(),
            cpt: cpt.to_string(),
            servicing_provider: "Dr. Smith".to_string(),
            supervising_provider: "Dr. Johnson".to_string(),
            ..Default::default()
        }
    }

    fn run(records: &[Encounter]) -> Vec<BillingOutcome> {
        BillingEvaluator::new().batch_evaluate(records)
    }

    #[test]
    fn test_first_failure_adds_entry() {
        let records = vec![encounter("Doe, Jane", "99213", "")];
        let outcomes = run(&records);
        let (ledger, stats) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");

        assert_eq!(stats, ReconcileStats { added: 1, updated: 0, removed: 0 });
        assert_eq!(ledger.len(), 1);
        let entry = ledger.iter().next().unwrap();
        assert_eq!(entry.reason, "Missing DX");
        assert_eq!(entry.last_attempt, "12-09-2025");
        assert_eq!(entry.billed, "No");
    }

    #[test]
    fn test_repeat_failure_updates_attempt_and_reason_only() {
        let mut records = vec![encounter("Doe, Jane", "99213", "")];
        let outcomes = run(&records);
        let (ledger, _) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");

        // Same encounter still failing the next day
        records[0].observation = "Stable".to_string();
        let outcomes = run(&records);
        let (ledger, stats) = reconcile(&ledger, &records, &outcomes, "12-10-2025");

        assert_eq!(stats, ReconcileStats { added: 0, updated: 1, removed: 0 });
        let entry = ledger.iter().next().unwrap();
        assert_eq!(entry.last_attempt, "12-10-2025");
        // Display fields keep their first-recorded values
        assert_eq!(entry.patient_name, "Doe, Jane");
        assert_eq!(entry.date_of_service, "12-09-2025");
    }

    #[test]
    fn test_success_removes_existing_entry() {
        let records = vec![encounter("Doe, Jane", "99213", "")];
        let outcomes = run(&records);
        let (ledger, _) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");
        assert_eq!(ledger.len(), 1);

        let healed = vec![encounter("Doe, Jane", "99213", "I10")];
        let outcomes = run(&healed);
        let (ledger, stats) = reconcile(&ledger, &healed, &outcomes, "12-10-2025");

        assert_eq!(stats, ReconcileStats { added: 0, updated: 0, removed: 1 });
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_success_without_entry_is_noop() {
        let records = vec![encounter("Doe, Jane", "99213", "I10")];
        let outcomes = run(&records);
        let (ledger, stats) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");

        assert_eq!(stats, ReconcileStats::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_absent_keys_carry_forward_unchanged() {
        let old = encounter("Absent, Al", "99213", "");
        let outcomes = run(&[old.clone()]);
        let (ledger, _) = reconcile(&Ledger::new(), &[old.clone()], &outcomes, "12-01-2025");
        let carried = ledger.iter().next().unwrap().clone();

        let records = vec![encounter("Doe, Jane", "99214", "")];
        let outcomes = run(&records);
        let (ledger, stats) = reconcile(&ledger, &records, &outcomes, "12-09-2025");

        assert_eq!(stats, ReconcileStats { added: 1, updated: 0, removed: 0 });
        assert_eq!(ledger.len(), 2);
        let key = EncounterKey::from_encounter(&old);
        assert_eq!(ledger.get(&key), Some(&carried));
    }

    #[test]
    fn test_missing_outcome_recorded_as_unknown_error() {
        let records = vec![encounter("Doe, Jane", "99213", "I10")];
        // Outcomes for a different batch entirely
        let other = vec![encounter("Other, Pat", "99214", "I10")];
        let outcomes = run(&other);
        let (ledger, stats) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");

        assert_eq!(stats, ReconcileStats { added: 1, updated: 0, removed: 0 });
        assert_eq!(ledger.iter().next().unwrap().reason, "Unknown Error");
    }

    #[test]
    fn test_reconcile_is_idempotent_on_stats() {
        let records = vec![
            encounter("Doe, Jane", "99213", ""),
            encounter("Roe, Rick", "99214", "I10"),
        ];
        let outcomes = run(&records);
        let (first, stats1) = reconcile(&Ledger::new(), &records, &outcomes, "12-09-2025");
        assert_eq!(stats1, ReconcileStats { added: 1, updated: 0, removed: 0 });

        let (second, stats2) = reconcile(&first, &records, &outcomes, "12-09-2025");
        assert_eq!(stats2, ReconcileStats { added: 0, updated: 1, removed: 0 });
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_billed_key_removed_once() {
        let seed = vec![encounter("Doe, Jane", "99213", "")];
        let outcomes = run(&seed);
        let (ledger, _) = reconcile(&Ledger::new(), &seed, &outcomes, "12-09-2025");

        // Two identical records bill successfully; the single entry is
        // removed exactly once
        let healed = vec![
            encounter("Doe, Jane", "99213", "I10"),
            encounter("Doe, Jane", "99213", "I10"),
        ];
        let outcomes = run(&healed);
        let (ledger, stats) = reconcile(&ledger, &healed, &outcomes, "12-10-2025");

        assert_eq!(stats.removed, 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_previous_ledger_not_mutated() {
        let seed = vec![encounter("Doe, Jane", "99213", "")];
        let outcomes = run(&seed);
        let (previous, _) = reconcile(&Ledger::new(), &seed, &outcomes, "12-09-2025");
        let snapshot = previous.clone();

        let healed = vec![encounter("Doe, Jane", "99213", "I10")];
        let outcomes = run(&healed);
        let (_, _) = reconcile(&previous, &healed, &outcomes, "12-10-2025");

        assert_eq!(previous, snapshot);
    }
}

//! Billed-encounter aggregation for the report's Summary sheet
//!
//! Groups successfully billed encounters by (date of service, facility,
//! servicing provider, type of care). The group key uses the raw field
//! values exactly as they appear in the record - no normalization - so two
//! spellings of the same facility aggregate separately, mirroring the
//! report the billing office has always received.

use crate::domain::{BillingOutcome, Encounter};
use std::collections::HashMap;

/// Aggregated counts for one (date, facility, provider, type of care) group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryGroup {
    /// Date of service, raw as it appears in the record
    pub date_of_service: String,

    /// Facility, raw
    pub facility: String,

    /// Servicing provider, raw
    pub provider: String,

    /// Type of care, raw
    pub type_of_care: String,

    /// Number of billed encounters in the group
    pub billed: usize,

    /// Number of procedure codes billed; one per encounter under the
    /// current rule set
    pub procedure_codes: usize,
}

/// Aggregates billed encounters into summary groups
///
/// Only records whose outcome is billed participate. `records` and
/// `outcomes` correspond index-for-index, as produced by batch evaluation.
///
/// Output is sorted ascending by the raw date-of-service string. The sort
/// is lexicographic, not calendar-aware - a long-standing simplification
/// kept for report compatibility - and ties keep first-seen insertion
/// order.
pub fn aggregate(records: &[Encounter], outcomes: &[BillingOutcome]) -> Vec<SummaryGroup> {
    let mut index: HashMap<(String, String, String, String), usize> = HashMap::new();
    let mut groups: Vec<SummaryGroup> = Vec::new();

    for (record, outcome) in records.iter().zip(outcomes) {
        if !outcome.is_billed() {
            continue;
        }

        let group_key = (
            record.date_of_service.clone(),
            record.facility.clone(),
            record.servicing_provider.clone(),
            record.type_of_care.clone(),
        );

        let slot = *index.entry(group_key).or_insert_with(|| {
            groups.push(SummaryGroup {
                date_of_service: record.date_of_service.clone(),
                facility: record.facility.clone(),
                provider: record.servicing_provider.clone(),
                type_of_care: record.type_of_care.clone(),
                billed: 0,
                procedure_codes: 0,
            });
            groups.len() - 1
        });

        groups[slot].billed += 1;
        groups[slot].procedure_codes += 1;
    }

    // Stable sort preserves insertion order within equal dates
    groups.sort_by(|a, b| a.date_of_service.cmp(&b.date_of_service));

    tracing::debug!(groups = groups.len(), "Aggregated billed encounters");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluate::BillingEvaluator;

    fn encounter(dos: &str, facility: &str, provider: &str, care: &str, billed: bool) -> Encounter {
        Encounter {
            patient_name: "Doe, Jane".to_string(),
            dob: "01-15-1950".to_string(),
            date_of_service: dos.to_string(),
            type_of_care: care.to_string(),
            facility: facility.to_string(),
            assessment: if billed { "I10".to_string() } else { String::new() },
            cpt: "99213".to_string(),
            servicing_provider: provider.to_string(),
            supervising_provider: "Dr. Johnson".to_string(),
            ..Default::default()
        }
    }

    fn aggregate_run(records: &[Encounter]) -> Vec<SummaryGroup> {
        let outcomes = BillingEvaluator::new().batch_evaluate(records);
        aggregate(records, &outcomes)
    }

    #[test]
    fn test_groups_by_full_tuple() {
        let records = vec![
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("12-09-2025", "Hospital B", "Dr. Smith", "LTC", true),
        ];
        let groups = aggregate_run(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].billed, 2);
        assert_eq!(groups[0].procedure_codes, 2);
        assert_eq!(groups[1].billed, 1);
    }

    #[test]
    fn test_denied_records_excluded() {
        let records = vec![
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", false),
        ];
        let groups = aggregate_run(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].billed, 1);
    }

    #[test]
    fn test_billed_counts_conserved() {
        let records = vec![
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("12-10-2025", "Hospital B", "Dr. Lee", "SNF", true),
            encounter("12-10-2025", "Hospital B", "Dr. Lee", "SNF", false),
            encounter("12-11-2025", "Hospital A", "Dr. Smith", "LTC", true),
        ];
        let outcomes = BillingEvaluator::new().batch_evaluate(&records);
        let groups = aggregate(&records, &outcomes);

        let billed_total: usize = groups.iter().map(|g| g.billed).sum();
        let successes = outcomes.iter().filter(|o| o.is_billed()).count();
        assert_eq!(billed_total, successes);
    }

    #[test]
    fn test_sorted_lexicographically_by_raw_date() {
        let records = vec![
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("01-02-2026", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("11-30-2025", "Hospital A", "Dr. Smith", "LTC", true),
        ];
        let groups = aggregate_run(&records);
        let dates: Vec<&str> = groups.iter().map(|g| g.date_of_service.as_str()).collect();
        // String order: "01-02-2026" < "11-30-2025" < "12-09-2025"
        assert_eq!(dates, vec!["01-02-2026", "11-30-2025", "12-09-2025"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            encounter("12-09-2025", "Hospital B", "Dr. Lee", "SNF", true),
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
        ];
        let groups = aggregate_run(&records);
        assert_eq!(groups[0].facility, "Hospital B");
        assert_eq!(groups[1].facility, "Hospital A");
    }

    #[test]
    fn test_raw_values_not_normalized() {
        let records = vec![
            encounter("12-09-2025", "Hospital A", "Dr. Smith", "LTC", true),
            encounter("12-09-2025", "HOSPITAL A", "Dr. Smith", "LTC", true),
        ];
        let groups = aggregate_run(&records);
        // Different spellings aggregate separately
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(aggregate_run(&[]).is_empty());
    }
}

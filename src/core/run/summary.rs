//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting the results
//! of one reconciliation run.

use crate::core::ledger::ReconcileStats;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one reconciliation run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Correlation id stamped into every log line of the run
    pub run_id: uuid::Uuid,

    /// Run date as stamped into file names and ledger rows
    pub run_date: String,

    /// Input extract path
    pub input_file: PathBuf,

    /// Encounters parsed from the extract
    pub total_encounters: usize,

    /// Input rows skipped as defective
    pub row_defects: usize,

    /// Encounters that billed successfully
    pub billed_count: usize,

    /// Encounters denied billing
    pub not_billed_count: usize,

    /// Ledger deltas applied by reconciliation
    pub ledger_stats: ReconcileStats,

    /// Entries in the ledger after reconciliation
    pub ledger_total: usize,

    /// Where the reconciliation report was written (None on dry runs)
    pub report_file: Option<PathBuf>,

    /// Where the updated ledger was written (None on dry runs)
    pub ledger_file: Option<PathBuf>,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_encounters == 0 {
            return 0.0;
        }
        (self.billed_count as f64 / self.total_encounters as f64) * 100.0
    }

    /// Log the summary at info level
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            run_date = %self.run_date,
            total_encounters = self.total_encounters,
            row_defects = self.row_defects,
            billed = self.billed_count,
            not_billed = self.not_billed_count,
            success_rate = format!("{:.1}%", self.success_rate()),
            ledger_added = self.ledger_stats.added,
            ledger_updated = self.ledger_stats.updated,
            ledger_removed = self.ledger_stats.removed,
            ledger_total = self.ledger_total,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis(),
            "Reconciliation run completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: usize, billed: usize) -> RunSummary {
        RunSummary {
            run_id: uuid::Uuid::new_v4(),
            run_date: "12-09-2025".to_string(),
            input_file: PathBuf::from("input.xlsx"),
            total_encounters: total,
            row_defects: 0,
            billed_count: billed,
            not_billed_count: total - billed,
            ledger_stats: ReconcileStats::default(),
            ledger_total: 0,
            report_file: None,
            ledger_file: None,
            dry_run: false,
            duration: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_success_rate() {
        assert_eq!(summary(10, 7).success_rate(), 70.0);
    }

    #[test]
    fn test_success_rate_empty_run_is_zero() {
        assert_eq!(summary(0, 0).success_rate(), 0.0);
    }
}

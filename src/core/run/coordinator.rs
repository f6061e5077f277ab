//! Run coordinator - sequences one full reconciliation run
//!
//! Parse, evaluate, aggregate, write the report, reconcile the ledger,
//! write the ledger. The coordinator owns only sequencing and path
//! resolution; each step lives in its own module.

use crate::adapters::xlsx::report::write_report;
use crate::adapters::{ExtractReader, LedgerStore};
use crate::config::BillsyncConfig;
use crate::core::aggregate::aggregate;
use crate::core::evaluate::BillingEvaluator;
use crate::core::ledger::reconcile;
use crate::core::run::summary::RunSummary;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Coordinates one reconciliation run
pub struct RunCoordinator {
    config: BillsyncConfig,
    reader: ExtractReader,
    ledger_store: LedgerStore,
}

impl RunCoordinator {
    /// Creates a coordinator from configuration
    pub fn new(config: BillsyncConfig) -> Self {
        let reader = ExtractReader::new(config.input.sheet_name.clone());
        let ledger_store = LedgerStore::new(
            config.ledger.folder_path.clone(),
            config.ledger.file_pattern.clone(),
        );
        Self {
            config,
            reader,
            ledger_store,
        }
    }

    /// Executes a full reconciliation run over one extract
    ///
    /// `previous_ledger` overrides latest-file discovery; `run_date`
    /// overrides the date stamped into file names and ledger rows. A dry
    /// run (config flag) evaluates and reconciles but writes nothing.
    pub fn execute(
        &self,
        input: &Path,
        previous_ledger: Option<&Path>,
        run_date: Option<&str>,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        let run_id = uuid::Uuid::new_v4();
        let run_date = match run_date {
            Some(date) => date.to_string(),
            None => chrono::Local::now()
                .format(&self.config.output.date_format)
                .to_string(),
        };
        let dry_run = self.config.application.dry_run;

        tracing::info!(
            run_id = %run_id,
            input = %input.display(),
            run_date = %run_date,
            dry_run,
            "Starting reconciliation run"
        );

        // Step 1: parse the extract
        let parsed = self.reader.read(input)?;
        for defect in &parsed.defects {
            tracing::warn!(row = defect.row, field = %defect.field, "Input row skipped: {}", defect.message);
        }

        let mut summary = RunSummary {
            run_id,
            run_date: run_date.clone(),
            input_file: input.to_path_buf(),
            total_encounters: parsed.encounters.len(),
            row_defects: parsed.defects.len(),
            billed_count: 0,
            not_billed_count: 0,
            ledger_stats: Default::default(),
            ledger_total: 0,
            report_file: None,
            ledger_file: None,
            dry_run,
            duration: started.elapsed(),
        };

        if parsed.encounters.is_empty() {
            tracing::warn!("No encounters to process");
            summary.duration = started.elapsed();
            summary.log_summary();
            return Ok(summary);
        }

        // Step 2: evaluate billing rules
        let mut evaluator = BillingEvaluator::new();
        let outcomes = evaluator.batch_evaluate(&parsed.encounters);
        summary.billed_count = outcomes.iter().filter(|o| o.is_billed()).count();
        summary.not_billed_count = outcomes.len() - summary.billed_count;
        tracing::info!(
            billed = summary.billed_count,
            not_billed = summary.not_billed_count,
            "Billing evaluation complete"
        );

        // Step 3: write the reconciliation report
        let groups = aggregate(&parsed.encounters, &outcomes);
        if dry_run {
            tracing::info!("Dry run: skipping report write");
        } else {
            let report_path = self.report_path(&run_date);
            if let Some(parent) = report_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            write_report(&report_path, &parsed.encounters, &outcomes, &groups)?;
            summary.report_file = Some(report_path);
        }

        // Step 4: reconcile and persist the ledger
        let previous = self.ledger_store.load_previous(previous_ledger);
        let (ledger, stats) = reconcile(&previous, &parsed.encounters, &outcomes, &run_date);
        summary.ledger_stats = stats;
        summary.ledger_total = ledger.len();
        if dry_run {
            tracing::info!("Dry run: skipping ledger write");
        } else {
            summary.ledger_file = Some(self.ledger_store.save(&ledger, &run_date)?);
        }

        summary.duration = started.elapsed();
        summary.log_summary();
        Ok(summary)
    }

    fn report_path(&self, run_date: &str) -> PathBuf {
        Path::new(&self.config.output.folder_path).join(
            self.config
                .output
                .report_file_pattern
                .replace("{date}", run_date),
        )
    }
}

//! Missing-ledger persistence
//!
//! The ledger file is a single-sheet workbook whose columns are addressed
//! by name, not position - a reordered file loads identically. The
//! encounter key is never written; it is recomputed from the display
//! columns on load. Any failure loading a previous ledger degrades to an
//! empty ledger: a fresh start is a valid, if suboptimal, state, while
//! aborting would block the day's reconciliation.

use crate::adapters::xlsx::{autosize_columns, cell_to_text, write_header_row, write_text_row};
use crate::domain::{BillsyncError, Ledger, LedgerEntry, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Ledger sheet columns, in write order
const LEDGER_HEADERS: [&str; 9] = [
    "Patient Name",
    "DOB",
    "Date of Service",
    "Type of Care",
    "Type of Visit",
    "Facility",
    "Last Attempt to Process",
    "Billed",
    "Reason for not billed",
];

/// Width cap for ledger columns
const LEDGER_WIDTH_CAP: f64 = 50.0;

/// Placeholder substituted with the run date in ledger file names
const DATE_PLACEHOLDER: &str = "{date}";

/// Loads and saves missing-ledger workbooks in a configured folder
#[derive(Debug, Clone)]
pub struct LedgerStore {
    folder: PathBuf,
    file_pattern: String,
}

impl LedgerStore {
    /// Creates a store over a folder and a file-name pattern containing
    /// the `{date}` placeholder
    pub fn new(folder: impl Into<PathBuf>, file_pattern: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file_pattern: file_pattern.into(),
        }
    }

    /// Path the ledger for a given run date is written to
    pub fn path_for(&self, run_date: &str) -> PathBuf {
        self.folder
            .join(self.file_pattern.replace(DATE_PLACEHOLDER, run_date))
    }

    /// Finds the most recently modified ledger file in the folder
    ///
    /// Matches files that start with the pattern's prefix (the text before
    /// `{date}`) and end in `.xlsx`.
    pub fn find_latest(&self) -> Option<PathBuf> {
        let prefix = self
            .file_pattern
            .split(DATE_PLACEHOLDER)
            .next()
            .unwrap_or(&self.file_pattern)
            .trim_end();

        let entries = std::fs::read_dir(&self.folder).ok()?;
        let mut candidates: Vec<(std::time::SystemTime, PathBuf)> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().to_string_lossy().to_string();
                if !name.starts_with(prefix) || !name.ends_with(".xlsx") {
                    return None;
                }
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((modified, entry.path()))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.cmp(&a.0));
        candidates.into_iter().next().map(|(_, path)| path)
    }

    /// Loads the previous ledger, degrading to empty on any failure
    ///
    /// `path` of `None` triggers latest-file discovery; no file found means
    /// a fresh ledger. Load errors are logged, never propagated.
    pub fn load_previous(&self, path: Option<&Path>) -> Ledger {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match self.find_latest() {
                Some(path) => path,
                None => {
                    tracing::info!("No previous ledger file found, starting fresh");
                    return Ledger::new();
                }
            },
        };

        match self.try_load(&path) {
            Ok(ledger) => {
                tracing::info!(
                    path = %path.display(),
                    entries = ledger.len(),
                    "Loaded previous ledger"
                );
                ledger
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load previous ledger, starting fresh"
                );
                Ledger::new()
            }
        }
    }

    /// Loads a ledger file strictly, propagating errors
    pub fn try_load(&self, path: &Path) -> Result<Ledger> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| BillsyncError::LedgerStore(format!("{}: {e}", path.display())))?;

        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| BillsyncError::LedgerStore("workbook contains no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| BillsyncError::LedgerStore(format!("sheet '{sheet}': {e}")))?;

        let mut rows = range.rows();
        let header = match rows.next() {
            Some(header) => header,
            None => return Ok(Ledger::new()),
        };

        let columns: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                let name = cell_to_text(cell);
                let name = name.trim();
                if name.is_empty() {
                    None
                } else {
                    Some((name.to_string(), idx))
                }
            })
            .collect();

        let mut entries = Vec::new();
        for (offset, row) in rows.enumerate() {
            match parse_entry(row, &columns) {
                Some(entry) => entries.push(entry),
                None => {
                    tracing::warn!(row = offset + 2, "Skipping unreadable ledger row");
                }
            }
        }

        Ok(Ledger::from_entries(entries))
    }

    /// Writes the ledger for a run date, rows sorted ascending by raw
    /// date-of-service text
    pub fn save(&self, ledger: &Ledger, run_date: &str) -> Result<PathBuf> {
        let path = self.path_for(run_date);
        std::fs::create_dir_all(&self.folder)?;

        let rows: Vec<Vec<String>> = ledger
            .entries_by_service_date()
            .iter()
            .map(|entry| entry_row(entry))
            .collect();

        let write_err = |e: rust_xlsxwriter::XlsxError| BillsyncError::LedgerStore(e.to_string());

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Data").map_err(write_err)?;
        write_header_row(sheet, &LEDGER_HEADERS).map_err(write_err)?;
        for (idx, row) in rows.iter().enumerate() {
            write_text_row(sheet, idx as u32 + 1, row).map_err(write_err)?;
        }
        autosize_columns(sheet, &LEDGER_HEADERS, &rows, LEDGER_WIDTH_CAP).map_err(write_err)?;

        workbook
            .save(&path)
            .map_err(|e| BillsyncError::LedgerStore(format!("{}: {e}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            entries = ledger.len(),
            "Saved missing ledger"
        );
        Ok(path)
    }
}

/// Reads one ledger row by column name, recomputing its key
///
/// Returns `None` only when the row is entirely empty.
fn parse_entry(row: &[Data], columns: &HashMap<String, usize>) -> Option<LedgerEntry> {
    let field = |name: &str| -> String {
        columns
            .get(name)
            .and_then(|idx| row.get(*idx))
            .map(cell_to_text)
            .unwrap_or_default()
    };

    let patient_name = field("Patient Name");
    let dob = field("DOB");
    let date_of_service = field("Date of Service");
    let facility = field("Facility");

    if patient_name.trim().is_empty()
        && dob.trim().is_empty()
        && date_of_service.trim().is_empty()
        && facility.trim().is_empty()
    {
        return None;
    }

    let key = LedgerEntry::derive_key(&patient_name, &dob, &date_of_service, &facility);

    Some(LedgerEntry {
        patient_name,
        dob,
        date_of_service,
        type_of_care: field("Type of Care"),
        type_of_visit: field("Type of Visit"),
        facility,
        last_attempt: field("Last Attempt to Process"),
        billed: field("Billed"),
        reason: field("Reason for not billed"),
        key,
    })
}

fn entry_row(entry: &LedgerEntry) -> Vec<String> {
    vec![
        entry.patient_name.clone(),
        entry.dob.clone(),
        entry.date_of_service.clone(),
        entry.type_of_care.clone(),
        entry.type_of_visit.clone(),
        entry.facility.clone(),
        entry.last_attempt.clone(),
        entry.billed.clone(),
        entry.reason.clone(),
    ]
}

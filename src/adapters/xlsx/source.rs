//! Record source: reads daily encounter extracts
//!
//! This adapter is the only place that knows the extract's column names.
//! It maps the header row onto the fixed [`Encounter`] shape once, so the
//! core never performs name-based field lookup. Missing optional columns
//! become empty strings; missing required columns fail the run before any
//! record is processed.

use crate::adapters::xlsx::cell_to_text;
use crate::domain::{Encounter, Result, SourceError};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Full extract column schema, in the order sample files are generated
pub const EXTRACT_COLUMNS: [&str; 19] = [
    "Patient Name",
    "DOB",
    "Date of Service",
    "Type of Care",
    "Type of Visit",
    "Facility",
    "Room",
    "Assessment",
    "CPT",
    "Chief Complaint",
    "Visit Type",
    "Servicing Provider",
    "Supervising Provider",
    "Time",
    "Code Status",
    "Observation",
    "Encounter Status",
    "Status Aux",
    "Export Date",
];

/// Columns that must be present in the extract header
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Patient Name",
    "DOB",
    "Date of Service",
    "Type of Care",
    "Type of Visit",
    "Facility",
    "Servicing Provider",
    "Supervising Provider",
];

/// A skipped input row
///
/// Recorded with enough context to reconstruct the decision; never aborts
/// the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefect {
    /// 1-based spreadsheet row number
    pub row: usize,

    /// Field (or "row" for whole-row defects)
    pub field: String,

    /// What was wrong
    pub message: String,
}

impl std::fmt::Display for RowDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}, field '{}': {}", self.row, self.field, self.message)
    }
}

/// Result of parsing one extract
#[derive(Debug, Default)]
pub struct ParsedExtract {
    /// Encounters in sheet order
    pub encounters: Vec<Encounter>,

    /// Rows skipped during parsing
    pub defects: Vec<RowDefect>,
}

/// Reads encounter extracts from Excel workbooks
#[derive(Debug, Clone)]
pub struct ExtractReader {
    sheet_name: String,
}

impl ExtractReader {
    /// Creates a reader that looks for the given sheet, falling back to the
    /// workbook's first sheet when absent
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Parses an extract file into encounters plus row defects
    ///
    /// # Errors
    ///
    /// Fails when the workbook cannot be opened, the sheet is empty, or any
    /// required column is missing from the header (all missing columns are
    /// reported together).
    pub fn read(&self, path: impl AsRef<Path>) -> Result<ParsedExtract> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Reading encounter extract");

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| SourceError::Workbook(format!("{}: {e}", path.display())))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet = if sheet_names.iter().any(|s| s == &self.sheet_name) {
            self.sheet_name.clone()
        } else {
            let fallback = sheet_names
                .first()
                .cloned()
                .ok_or_else(|| SourceError::Workbook("workbook contains no sheets".to_string()))?;
            tracing::warn!(
                requested = %self.sheet_name,
                using = %fallback,
                "Configured sheet not found, using first sheet"
            );
            fallback
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| SourceError::Workbook(format!("sheet '{sheet}': {e}")))?;

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| SourceError::EmptySheet(sheet.clone()))?;

        let columns = column_map(header);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !columns.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SourceError::MissingColumns { columns: missing }.into());
        }

        let mut parsed = ParsedExtract::default();
        for (offset, row) in rows.enumerate() {
            let row_number = offset + 2; // 1-based, after the header
            let encounter = parse_row(row, &columns);

            if encounter.is_blank() {
                let defect = RowDefect {
                    row: row_number,
                    field: "row".to_string(),
                    message: "blank row skipped".to_string(),
                };
                tracing::warn!(row = row_number, "Skipping blank extract row");
                parsed.defects.push(defect);
                continue;
            }

            parsed.encounters.push(encounter);
        }

        tracing::info!(
            encounters = parsed.encounters.len(),
            defects = parsed.defects.len(),
            "Parsed encounter extract"
        );
        Ok(parsed)
    }
}

/// Maps header cell text to column position
fn column_map(header: &[Data]) -> HashMap<String, usize> {
    header
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
        .collect()
}

/// Builds the fixed record shape from one sheet row
///
/// Columns absent from the header (or cells past the row's end) read as
/// empty strings.
fn parse_row(row: &[Data], columns: &HashMap<String, usize>) -> Encounter {
    let field = |name: &str| -> String {
        columns
            .get(name)
            .and_then(|idx| row.get(*idx))
            .map(cell_to_text)
            .unwrap_or_default()
    };

    Encounter {
        patient_name: field("Patient Name"),
        dob: field("DOB"),
        date_of_service: field("Date of Service"),
        type_of_care: field("Type of Care"),
        type_of_visit: field("Type of Visit"),
        facility: field("Facility"),
        room: field("Room"),
        assessment: field("Assessment"),
        cpt: field("CPT"),
        chief_complaint: field("Chief Complaint"),
        visit_type: field("Visit Type"),
        servicing_provider: field("Servicing Provider"),
        supervising_provider: field("Supervising Provider"),
        time: field("Time"),
        code_status: field("Code Status"),
        observation: field("Observation"),
        encounter_status: field("Encounter Status"),
        status_aux: field("Status Aux"),
        export_date: field("Export Date"),
    }
}

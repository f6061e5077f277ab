//! Report sink: writes the two-sheet reconciliation report
//!
//! The "Data" sheet carries every input record, in input order, plus its
//! billed flag and failure reason. The "Summary" sheet carries the
//! aggregator's billed-only groups.

use crate::adapters::xlsx::{autosize_columns, write_header_row, write_text_row};
use crate::core::aggregate::SummaryGroup;
use crate::domain::{BillingOutcome, Encounter, Result};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Column headers for the Data sheet
const DATA_HEADERS: [&str; 21] = [
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
    "Billed",
    "Reason for not billed",
];

/// Column headers for the Summary sheet
const SUMMARY_HEADERS: [&str; 6] = [
    "Date",
    "Facility",
    "Provider",
    "Type of Care",
    "PRM Billing",
    "CPTs",
];

/// Width cap for Data sheet columns
const DATA_WIDTH_CAP: f64 = 50.0;

/// Width cap for Summary sheet columns
const SUMMARY_WIDTH_CAP: f64 = 30.0;

/// Writes the reconciliation report workbook
///
/// `records` and `outcomes` correspond index-for-index, as produced by
/// batch evaluation; row order in the Data sheet is exactly input order.
pub fn write_report(
    path: impl AsRef<Path>,
    records: &[Encounter],
    outcomes: &[BillingOutcome],
    groups: &[SummaryGroup],
) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();

    let data_rows: Vec<Vec<String>> = records
        .iter()
        .zip(outcomes)
        .map(|(record, outcome)| data_row(record, outcome))
        .collect();

    let data_sheet = workbook.add_worksheet();
    data_sheet.set_name("Data")?;
    write_header_row(data_sheet, &DATA_HEADERS)?;
    for (idx, row) in data_rows.iter().enumerate() {
        write_text_row(data_sheet, idx as u32 + 1, row)?;
    }
    autosize_columns(data_sheet, &DATA_HEADERS, &data_rows, DATA_WIDTH_CAP)?;

    let summary_rows: Vec<Vec<String>> = groups.iter().map(summary_row).collect();
    let summary_sheet = workbook.add_worksheet();
    summary_sheet.set_name("Summary")?;
    write_header_row(summary_sheet, &SUMMARY_HEADERS)?;
    for (idx, row) in summary_rows.iter().enumerate() {
        write_text_row(summary_sheet, idx as u32 + 1, row)?;
    }
    autosize_columns(summary_sheet, &SUMMARY_HEADERS, &summary_rows, SUMMARY_WIDTH_CAP)?;

    workbook.save(path)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        groups = groups.len(),
        "Wrote reconciliation report"
    );
    Ok(())
}

fn data_row(record: &Encounter, outcome: &BillingOutcome) -> Vec<String> {
    let billed = if outcome.is_billed() { "Yes" } else { "No" };
    let reason = outcome
        .denial_reason()
        .map(|r| r.as_str().to_string())
        .unwrap_or_default();

    vec![
        record.patient_name.clone(),
        record.dob.clone(),
        record.date_of_service.clone(),
        record.type_of_care.clone(),
        record.type_of_visit.clone(),
        record.facility.clone(),
        record.room.clone(),
        record.assessment.clone(),
        record.cpt.clone(),
        record.chief_complaint.clone(),
        record.visit_type.clone(),
        record.servicing_provider.clone(),
        record.supervising_provider.clone(),
        record.time.clone(),
        record.code_status.clone(),
        record.observation.clone(),
        record.encounter_status.clone(),
        record.status_aux.clone(),
        record.export_date.clone(),
        billed.to_string(),
        reason,
    ]
}

fn summary_row(group: &SummaryGroup) -> Vec<String> {
    vec![
        group.date_of_service.clone(),
        group.facility.clone(),
        group.provider.clone(),
        group.type_of_care.clone(),
        group.billed.to_string(),
        group.procedure_codes.to_string(),
    ]
}

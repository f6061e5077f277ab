//! End-to-end pipeline tests
//!
//! Drives the run coordinator over real workbook files in temp folders:
//! extract in, report and ledger out, second run against the persisted
//! ledger.

use billsync::adapters::xlsx::source::EXTRACT_COLUMNS;
use billsync::config::BillsyncConfig;
use billsync::core::run::RunCoordinator;
use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes an extract workbook; `rows` are full 19-column rows
fn write_extract(path: &Path, header: &[&str], rows: &[Vec<String>]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, c as u16, value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// One extract row; a blank `cpt` produces a Missing CPT denial
fn extract_row(n: usize, cpt: &str) -> Vec<String> {
    vec![
        format!("Patient{n:03}, Test"),
        format!("0{}-15-{}", (n % 9) + 1, 1950 + n),
        "12-09-2025".to_string(),
        "LTC".to_string(),
        "New".to_string(),
        "Hospital A".to_string(),
        format!("{}", 100 + n),
        "I10, E11.9".to_string(),
        cpt.to_string(),
        "Routine checkup".to_string(),
        "New".to_string(),
        "Dr. Smith".to_string(),
        "Dr. Johnson".to_string(),
        "10:00 AM".to_string(),
        "Full Code".to_string(),
        "Stable".to_string(),
        "Completed".to_string(),
        "Normal".to_string(),
        "12-09-2025".to_string(),
    ]
}

fn test_config(dir: &TempDir) -> BillsyncConfig {
    let mut config = BillsyncConfig::default();
    config.output.folder_path = dir.path().join("out").to_string_lossy().to_string();
    config.ledger.folder_path = dir.path().join("out").to_string_lossy().to_string();
    config
}

fn fifteen_rows() -> Vec<Vec<String>> {
    (1..=15)
        .map(|n| extract_row(n, if n <= 10 { "99213" } else { "" }))
        .collect()
}

fn sheet_rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn full_run_writes_report_and_ledger() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");
    write_extract(&input, &EXTRACT_COLUMNS, &fifteen_rows());

    let coordinator = RunCoordinator::new(test_config(&dir));
    let summary = coordinator.execute(&input, None, Some("12-09-2025")).unwrap();

    assert_eq!(summary.total_encounters, 15);
    assert_eq!(summary.billed_count, 10);
    assert_eq!(summary.not_billed_count, 5);
    assert_eq!(summary.ledger_stats.added, 5);
    assert_eq!(summary.ledger_total, 5);

    let report = summary.report_file.expect("report written");
    let ledger_file = summary.ledger_file.expect("ledger written");
    assert!(report.exists());
    assert!(ledger_file.exists());
    assert!(report.ends_with(PathBuf::from("General Reconciliation 12-09-2025.xlsx")));

    // Data sheet: header plus every record in input order, flagged
    let data = sheet_rows(&report, "Data");
    assert_eq!(data.len(), 16);
    assert_eq!(data[0][19], "Billed");
    assert_eq!(data[1][19], "Yes");
    assert_eq!(data[1][20], "");
    assert_eq!(data[11][19], "No");
    assert_eq!(data[11][20], "Missing CPT");

    // Summary sheet: one group of ten billed encounters
    let summary_rows = sheet_rows(&report, "Summary");
    assert_eq!(summary_rows.len(), 2);
    assert_eq!(
        summary_rows[1],
        vec!["12-09-2025", "Hospital A", "Dr. Smith", "LTC", "10", "10"]
    );

    // Ledger file: the five denied encounters
    let ledger_rows = sheet_rows(&ledger_file, "Data");
    assert_eq!(ledger_rows.len(), 6);
    assert!(ledger_rows
        .iter()
        .skip(1)
        .all(|row| row[7] == "No" && row[8] == "Missing CPT"));
}

#[test]
fn second_run_discovers_ledger_and_updates_entries() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");
    write_extract(&input, &EXTRACT_COLUMNS, &fifteen_rows());

    let coordinator = RunCoordinator::new(test_config(&dir));
    coordinator.execute(&input, None, Some("12-09-2025")).unwrap();

    // Give the second ledger file a later modification time
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let summary = coordinator.execute(&input, None, Some("12-10-2025")).unwrap();

    assert_eq!(summary.ledger_stats.added, 0);
    assert_eq!(summary.ledger_stats.updated, 5);
    assert_eq!(summary.ledger_stats.removed, 0);
    assert_eq!(summary.ledger_total, 5);

    let ledger_rows = sheet_rows(&summary.ledger_file.unwrap(), "Data");
    assert!(ledger_rows.iter().skip(1).all(|row| row[6] == "12-10-2025"));
}

#[test]
fn explicit_ledger_override_wins_over_discovery() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");
    write_extract(&input, &EXTRACT_COLUMNS, &fifteen_rows());

    let coordinator = RunCoordinator::new(test_config(&dir));
    let first = coordinator.execute(&input, None, Some("12-09-2025")).unwrap();
    let first_ledger = first.ledger_file.unwrap();

    // Pointing at the day-one ledger explicitly, even though a newer file
    // exists, reuses exactly that snapshot
    std::thread::sleep(std::time::Duration::from_millis(1100));
    coordinator.execute(&input, None, Some("12-10-2025")).unwrap();
    let summary = coordinator
        .execute(&input, Some(&first_ledger), Some("12-11-2025"))
        .unwrap();

    assert_eq!(summary.ledger_stats.added, 0);
    assert_eq!(summary.ledger_stats.updated, 5);
}

#[test]
fn missing_required_columns_fail_listing_all_of_them() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");

    // Drop DOB and Facility from the header
    let header: Vec<&str> = EXTRACT_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "DOB" && *c != "Facility")
        .collect();
    let rows = vec![vec![String::from("Patient001, Test"); header.len()]];
    write_extract(&input, &header, &rows);

    let coordinator = RunCoordinator::new(test_config(&dir));
    let err = coordinator
        .execute(&input, None, Some("12-09-2025"))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("DOB"));
    assert!(message.contains("Facility"));
}

#[test]
fn blank_rows_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");

    let mut rows = fifteen_rows();
    rows.insert(7, vec![String::new(); EXTRACT_COLUMNS.len()]);
    write_extract(&input, &EXTRACT_COLUMNS, &rows);

    let coordinator = RunCoordinator::new(test_config(&dir));
    let summary = coordinator.execute(&input, None, Some("12-09-2025")).unwrap();

    assert_eq!(summary.total_encounters, 15);
    assert_eq!(summary.row_defects, 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("extract.xlsx");
    write_extract(&input, &EXTRACT_COLUMNS, &fifteen_rows());

    let mut config = test_config(&dir);
    config.application.dry_run = true;
    let coordinator = RunCoordinator::new(config);
    let summary = coordinator.execute(&input, None, Some("12-09-2025")).unwrap();

    assert_eq!(summary.billed_count, 10);
    assert_eq!(summary.ledger_stats.added, 5);
    assert!(summary.report_file.is_none());
    assert!(summary.ledger_file.is_none());
    assert!(!dir.path().join("out").exists());
}

//! Sample command implementation
//!
//! This module implements the `sample` command for generating a synthetic
//! encounter extract, useful for demos and smoke tests.

use crate::adapters::xlsx::source::EXTRACT_COLUMNS;
use crate::adapters::xlsx::{autosize_columns, write_header_row, write_text_row};
use clap::Args;
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;

/// Arguments for the sample command
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Path to write the sample extract to
    #[arg(short, long, default_value = "data/input/sample_extract.xlsx")]
    pub output: PathBuf,

    /// Number of encounters to generate
    #[arg(long, default_value_t = 15)]
    pub encounters: usize,

    /// How many encounters (from the end) lack diagnosis codes
    #[arg(long, default_value_t = 5)]
    pub missing_dx: usize,

    /// How many encounters (before those) lack a procedure code
    #[arg(long, default_value_t = 0)]
    pub missing_cpt: usize,

    /// Date of service stamped on every encounter
    #[arg(long, default_value = "12-09-2025")]
    pub date_of_service: String,
}

impl SampleArgs {
    /// Execute the sample command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(
            output = %self.output.display(),
            encounters = self.encounters,
            "Generating sample extract"
        );

        if self.missing_dx + self.missing_cpt > self.encounters {
            eprintln!("--missing-dx plus --missing-cpt cannot exceed --encounters");
            return Ok(2);
        }

        if let Some(parent) = self.output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let export_date = chrono::Local::now().format("%m-%d-%Y").to_string();
        let rows: Vec<Vec<String>> = (1..=self.encounters)
            .map(|n| {
                // Trailing encounters lose their DX, the block before those
                // loses the CPT
                let has_dx = n <= self.encounters - self.missing_dx;
                let has_cpt = n <= self.encounters - self.missing_dx - self.missing_cpt
                    || n > self.encounters - self.missing_dx;
                self.encounter_row(n, has_dx, has_cpt, &export_date)
            })
            .collect();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Sheet1")?;
        write_header_row(sheet, &EXTRACT_COLUMNS)?;
        for (idx, row) in rows.iter().enumerate() {
            write_text_row(sheet, idx as u32 + 1, row)?;
        }
        autosize_columns(sheet, &EXTRACT_COLUMNS, &rows, 50.0)?;
        workbook.save(&self.output)?;

        println!("✅ Sample extract created: {}", self.output.display());
        println!(
            "   {} encounters ({} missing DX, {} missing CPT)",
            self.encounters, self.missing_dx, self.missing_cpt
        );
        Ok(0)
    }

    fn encounter_row(&self, n: usize, has_dx: bool, has_cpt: bool, export_date: &str) -> Vec<String> {
        vec![
            format!("Patient{n:03}, Test"),
            format!("0{}-15-{}", (n % 9) + 1, 1950 + (n % 50)),
            self.date_of_service.clone(),
            "LTC".to_string(),
            if n % 2 == 0 { "Follow-up" } else { "New" }.to_string(),
            "Hospital A".to_string(),
            format!("{}", 100 + n),
            if has_dx { "I10, E11.9" } else { "" }.to_string(),
            if has_cpt { "99213" } else { "" }.to_string(),
            "Routine checkup".to_string(),
            if n % 3 == 0 { "Established" } else { "New" }.to_string(),
            "Dr. Smith".to_string(),
            "Dr. Johnson".to_string(),
            "10:00 AM".to_string(),
            "Full Code".to_string(),
            "Stable".to_string(),
            "Completed".to_string(),
            "Normal".to_string(),
            export_date.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(encounters: usize, missing_dx: usize, missing_cpt: usize) -> SampleArgs {
        SampleArgs {
            output: PathBuf::from("unused.xlsx"),
            encounters,
            missing_dx,
            missing_cpt,
            date_of_service: "12-09-2025".to_string(),
        }
    }

    #[test]
    fn test_encounter_row_matches_schema_width() {
        let row = args(15, 5, 0).encounter_row(1, true, true, "12-09-2025");
        assert_eq!(row.len(), EXTRACT_COLUMNS.len());
    }

    #[test]
    fn test_missing_dx_blanks_assessment_only() {
        let row = args(15, 5, 0).encounter_row(12, false, true, "12-09-2025");
        assert_eq!(row[7], "");
        assert_eq!(row[8], "99213");
    }
}

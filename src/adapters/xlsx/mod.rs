//! Excel adapters
//!
//! Reading uses calamine, writing uses rust_xlsxwriter. Shared cell and
//! styling helpers live here; the record source and report sink are
//! submodules.

pub mod report;
pub mod source;

use calamine::Data;
use rust_xlsxwriter::{Color, Format, Worksheet, XlsxError};

/// Header fill used across all generated sheets
const HEADER_FILL: Color = Color::RGB(0xDDDDDD);

/// Converts a calamine cell to the text form the pipeline works with
///
/// Numbers that are whole render without a decimal point so procedure
/// codes stored as numeric cells come back as "99213", not "99213.0".
/// Date-typed cells render as `YYYY-MM-DD` (with a time suffix only when
/// the cell carries one), which the key normalizer accepts directly.
pub(crate) fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => {
                if datetime.time() == chrono::NaiveTime::MIN {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            None => format!("{}", dt.as_f64()),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Writes a bold, grey-filled header row
pub(crate) fn write_header_row(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let format = Format::new().set_bold().set_background_color(HEADER_FILL);
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// Sizes each column to its longest cell, capped
///
/// `rows` holds the data rows only; headers are measured separately.
pub(crate) fn autosize_columns(
    worksheet: &mut Worksheet,
    headers: &[&str],
    rows: &[Vec<String>],
    cap: f64,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        let mut width = header.len();
        for row in rows {
            if let Some(value) = row.get(col) {
                width = width.max(value.len());
            }
        }
        worksheet.set_column_width(col as u16, ((width + 2) as f64).min(cap))?;
    }
    Ok(())
}

/// Writes one row of text cells starting at the given row index
pub(crate) fn write_text_row(
    worksheet: &mut Worksheet,
    row: u32,
    values: &[String],
) -> Result<(), XlsxError> {
    for (col, value) in values.iter().enumerate() {
        worksheet.write_string(row, col as u16, value)?;
    }
    Ok(())
}

//! Filing workbook loading.
//!
//! Loads the first worksheet of an `.xlsx` filing into a polars DataFrame
//! of string columns. The first row is the header. Numeric cells are
//! rendered as plain digit strings so the current-period column can be
//! cleaned and cast in one place by the analyzer, whether the source cell
//! was text (`"1,234"`) or a number.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use polars::prelude::*;

use crate::error::{DataError, Result};

/// Load the first worksheet of a filing workbook as string columns.
///
/// # Errors
///
/// Returns an error when the workbook cannot be opened, has no worksheet,
/// or the header row contains duplicate names.
pub fn load_filing_table(path: &Path) -> Result<DataFrame> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_to_string(cell) {
            Some(name) => name,
            None => format!("column_{idx}"),
        })
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(idx).and_then(cell_to_string));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Render a cell as a string, or `None` for empty cells.
///
/// Whole-number floats lose their `.0` suffix so codes like `212` compare
/// equal no matter how the cell was typed.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        other => Some(other.to_string()),
    }
}

//! Converted-table workbook output.
//!
//! Writes a raw tab-split table to `.xlsx` exactly as parsed: no header
//! row, no index column, every field a string cell.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

/// Errors that can occur while writing a converted table.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Excel write error.
    #[error("Excel write error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Write a table of rows to an `.xlsx` workbook.
///
/// Rows keep their own field counts; nothing is padded or truncated.
///
/// # Errors
///
/// Returns an error if the workbook cannot be written.
pub fn write_table(rows: &[Vec<String>], path: &Path) -> Result<(), ConvertError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, field) in row.iter().enumerate() {
            worksheet.write_string(row_idx as u32, col_idx as u16, field)?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// Map a source file path to its `.xlsx` sibling, e.g. `a/b.txt` → `a/b.xlsx`.
pub fn xlsx_sibling(path: &Path) -> PathBuf {
    path.with_extension("xlsx")
}

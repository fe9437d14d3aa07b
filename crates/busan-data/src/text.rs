//! Tab-delimited filing text exports.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A table parsed from a tab-delimited text export.
///
/// One row per input line, one field per tab-separated segment. No schema
/// is enforced: rows keep their own field counts, with no padding or
/// truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    /// Rows in input order.
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Split decoded text into rows of tab-separated fields.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// List the `.txt` files in a directory, sorted by name.
///
/// A missing directory yields an empty list; the caller decides whether
/// that is worth reporting.
pub fn discover_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().and_then(|ext| ext.to_str()) == Some("txt") && path.is_file()
        })
        .collect();
    files.sort();
    Ok(files)
}

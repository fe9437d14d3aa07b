//! Filename conventions for DART filing exports.
//!
//! Yearly exports are named `<year>_<statement name>.xlsx`. The reporter only
//! consumes separate income statements (손익계산서), skipping consolidated
//! (연결) and comprehensive (포괄) variants. Filenames coming off macOS
//! volumes are often NFD-decomposed, so every check normalizes to NFC first.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Marker identifying an income statement export.
const INCOME_STATEMENT_MARKER: &str = "손익계산서";

/// Marker identifying a consolidated statement, which is excluded.
const CONSOLIDATED_MARKER: &str = "연결";

/// Marker identifying a comprehensive-income statement, which is excluded.
const COMPREHENSIVE_MARKER: &str = "포괄";

/// Errors raised when a filename violates the export naming convention.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// The filename has no `_` separating the year label from the rest.
    #[error("no year label in {0:?}: expected <year>_<statement>.xlsx")]
    MissingYearLabel(String),

    /// The leading segment is not a 4-digit year.
    #[error("invalid year label {year:?} in {filename:?}: expected 4 digits")]
    InvalidYearLabel {
        /// Filename being parsed.
        filename: String,
        /// The offending leading segment.
        year: String,
    },
}

/// Returns true for filenames naming a separate income statement.
///
/// The name is NFC-normalized, then must contain 손익계산서 and contain
/// neither 연결 nor 포괄.
pub fn is_income_statement_file(filename: &str) -> bool {
    let normalized: String = filename.nfc().collect();
    normalized.contains(INCOME_STATEMENT_MARKER)
        && !normalized.contains(CONSOLIDATED_MARKER)
        && !normalized.contains(COMPREHENSIVE_MARKER)
}

/// Extract the year label from an export filename.
///
/// The label is the substring before the first `_` and must be a 4-digit
/// year, e.g. `"2021"` from `2021_손익계산서.xlsx`.
///
/// # Errors
///
/// Returns [`NamingError`] when the filename has no underscore or the
/// leading segment is not a 4-digit year.
pub fn year_from_filename(filename: &str) -> Result<String, NamingError> {
    let normalized: String = filename.nfc().collect();
    let (year, _) = normalized
        .split_once('_')
        .ok_or_else(|| NamingError::MissingYearLabel(filename.to_string()))?;
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(year.to_string())
    } else {
        Err(NamingError::InvalidYearLabel {
            filename: filename.to_string(),
            year: year.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2021_손익계산서.xlsx", true)]
    #[case("2021_연결손익계산서.xlsx", false)]
    #[case("2021_포괄손익계산서.xlsx", false)]
    #[case("2021_재무상태표.xlsx", false)]
    #[case("readme.txt", false)]
    fn test_income_statement_filter(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_income_statement_file(name), expected);
    }

    #[test]
    fn test_filter_accepts_nfd_name() {
        // macOS stores 손익계산서 decomposed; the filter must still match.
        let decomposed: String = "2021_손익계산서.xlsx".nfd().collect();
        assert_ne!(decomposed, "2021_손익계산서.xlsx");
        assert!(is_income_statement_file(&decomposed));
    }

    #[test]
    fn test_year_from_filename() {
        assert_eq!(
            year_from_filename("2021_손익계산서.xlsx").as_deref(),
            Ok("2021")
        );
    }

    #[rstest]
    #[case("손익계산서.xlsx")]
    #[case("result.xlsx")]
    fn test_year_missing_separator(#[case] name: &str) {
        assert_eq!(
            year_from_filename(name),
            Err(NamingError::MissingYearLabel(name.to_string()))
        );
    }

    #[rstest]
    #[case("21_손익계산서.xlsx", "21")]
    #[case("FY21_손익계산서.xlsx", "FY21")]
    #[case("_손익계산서.xlsx", "")]
    fn test_year_invalid_label(#[case] name: &str, #[case] year: &str) {
        assert_eq!(
            year_from_filename(name),
            Err(NamingError::InvalidYearLabel {
                filename: name.to_string(),
                year: year.to_string(),
            })
        );
    }
}

//! Consolidated ratio report workbook.
//!
//! Each company occupies a 4-row block: a header row with the company name
//! and one `{year}년` column per report year, then one row each for
//! 매출원가, 판관비 and 영업이익 formatted as `{:.2}%` (or `N/A` where the
//! company has no value that year). The company's chart PNG is embedded
//! next to the block, and blocks are separated by one blank row.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use busan::ratios::YearResults;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Image, Workbook, XlsxError};
use serde::Serialize;
use thiserror::Error;

use crate::chart::{self, ChartError, RatioSeries};

/// Rows per company block, including the blank separator row.
const BLOCK_ROWS: u32 = 5;

/// Zero-based column where chart images are anchored (column I).
const CHART_COLUMN: u16 = 8;

/// Scale applied to the 600×400 chart PNG when embedding (≈150×100 px).
const CHART_EMBED_SCALE: f64 = 0.25;

/// Errors that can occur while writing the report workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Excel write error.
    #[error("Excel write error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Chart rendering error.
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for report generation.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Directory receiving the per-company chart PNGs. Created if absent;
    /// existing charts are overwritten.
    pub charts_dir: PathBuf,

    /// Render and embed charts. Disabled in tests that run without fonts.
    pub include_charts: bool,
}

impl ReportOptions {
    /// Options with charts enabled, written to `charts_dir`.
    pub fn new(charts_dir: impl Into<PathBuf>) -> Self {
        Self {
            charts_dir: charts_dir.into(),
            include_charts: true,
        }
    }

    /// Skip chart rendering and embedding.
    #[must_use]
    pub fn without_charts(mut self) -> Self {
        self.include_charts = false;
        self
    }
}

/// Summary of a written report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Companies reported, in block order.
    pub companies: Vec<String>,

    /// Year labels covered, chronological.
    pub years: Vec<String>,

    /// Where the workbook was written.
    pub output_path: PathBuf,

    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Write the consolidated ratio report.
///
/// The company list is taken from the chronologically-first year's results;
/// a company that only appears in later years is not reported. Its
/// later-year values still show up in other companies' blocks as usual, and
/// the analyzer's skip listing is the place where the omission is visible.
///
/// # Errors
///
/// Returns an error when a chart cannot be rendered or the workbook cannot
/// be written.
pub fn write_report(
    results_by_year: &BTreeMap<String, YearResults>,
    output_path: &Path,
    options: &ReportOptions,
) -> Result<ReportSummary, ReportError> {
    let years: Vec<String> = results_by_year.keys().cloned().collect();
    let companies: Vec<String> = results_by_year
        .values()
        .next()
        .map(|first_year| {
            first_year
                .companies()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if options.include_charts && !companies.is_empty() {
        fs::create_dir_all(&options.charts_dir)?;
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mut row: u32 = 0;
    for company in &companies {
        worksheet.write_string(row, 0, company.as_str())?;
        for (idx, year) in years.iter().enumerate() {
            worksheet.write_string(row, (idx + 1) as u16, format!("{year}년"))?;
        }

        let series = RatioSeries::from_results(company, results_by_year);
        let ratio_rows: [(&str, &[Option<f64>]); 3] = [
            ("매출원가", &series.cost_of_sales),
            ("판관비", &series.sga_expenses),
            ("영업이익", &series.operating_income),
        ];
        for (offset, (label, values)) in ratio_rows.iter().enumerate() {
            let ratio_row = row + 1 + offset as u32;
            worksheet.write_string(ratio_row, 0, *label)?;
            for (idx, value) in values.iter().enumerate() {
                let cell = match value {
                    Some(pct) => format!("{pct:.2}%"),
                    None => "N/A".to_string(),
                };
                worksheet.write_string(ratio_row, (idx + 1) as u16, cell)?;
            }
        }

        if options.include_charts {
            let chart_path = options.charts_dir.join(chart::chart_filename(company));
            chart::render_chart(&series, &chart_path)?;
            let image = Image::new(&chart_path)?
                .set_scale_width(CHART_EMBED_SCALE)
                .set_scale_height(CHART_EMBED_SCALE);
            worksheet.insert_image(row + 1, CHART_COLUMN, &image)?;
        }

        row += BLOCK_ROWS;
    }

    workbook.save(output_path)?;
    Ok(ReportSummary {
        companies,
        years,
        output_path: output_path.to_path_buf(),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use busan::ratios::{LineItemValues, RatioRecord};
    use calamine::{Reader, Xlsx, open_workbook};

    fn record(company: &str, revenue: f64, cost: f64) -> RatioRecord {
        RatioRecord::from_line_items(
            company,
            &LineItemValues {
                revenue,
                cost_of_sales: cost,
                sga_expenses: 10.0,
                operating_income: 20.0,
            },
        )
    }

    fn results(records: Vec<RatioRecord>) -> YearResults {
        YearResults {
            records,
            skipped: Vec::new(),
        }
    }

    fn cell(range: &calamine::Range<calamine::Data>, row: u32, col: u32) -> String {
        range
            .get_value((row, col))
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_report_layout() {
        let mut by_year = BTreeMap::new();
        by_year.insert(
            "2021".to_string(),
            results(vec![record("한솔제지", 100.0, 40.0)]),
        );
        by_year.insert(
            "2022".to_string(),
            results(vec![record("한솔제지", 100.0, 55.0)]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        let summary = write_report(&by_year, &path, &options).unwrap();
        assert_eq!(summary.companies, vec!["한솔제지"]);
        assert_eq!(summary.years, vec!["2021", "2022"]);

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(cell(&range, 0, 0), "한솔제지");
        assert_eq!(cell(&range, 0, 1), "2021년");
        assert_eq!(cell(&range, 0, 2), "2022년");
        assert_eq!(cell(&range, 1, 0), "매출원가");
        assert_eq!(cell(&range, 1, 1), "40.00%");
        assert_eq!(cell(&range, 1, 2), "55.00%");
        assert_eq!(cell(&range, 2, 0), "판관비");
        assert_eq!(cell(&range, 3, 0), "영업이익");
        assert_eq!(cell(&range, 3, 1), "20.00%");
    }

    #[test]
    fn test_company_set_comes_from_first_year_only() {
        let mut by_year = BTreeMap::new();
        by_year.insert(
            "2021".to_string(),
            results(vec![record("한솔제지", 100.0, 40.0)]),
        );
        by_year.insert(
            "2022".to_string(),
            results(vec![
                record("한솔제지", 100.0, 40.0),
                record("무림페이퍼", 100.0, 60.0),
            ]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        let summary = write_report(&by_year, &path, &options).unwrap();

        // 무림페이퍼 only appears from 2022 on, so it is not reported.
        assert_eq!(summary.companies, vec!["한솔제지"]);
    }

    #[test]
    fn test_missing_year_renders_na() {
        let mut by_year = BTreeMap::new();
        by_year.insert(
            "2021".to_string(),
            results(vec![record("한솔제지", 100.0, 40.0)]),
        );
        by_year.insert("2022".to_string(), results(Vec::new()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        write_report(&by_year, &path, &options).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(cell(&range, 1, 2), "N/A");
        assert_eq!(cell(&range, 3, 2), "N/A");
    }

    #[test]
    fn test_zero_revenue_year_renders_na() {
        let mut by_year = BTreeMap::new();
        by_year.insert(
            "2021".to_string(),
            results(vec![record("한솔제지", 0.0, 40.0)]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        write_report(&by_year, &path, &options).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(cell(&range, 1, 1), "N/A");
    }

    #[test]
    fn test_blocks_are_separated_by_a_blank_row() {
        let mut by_year = BTreeMap::new();
        by_year.insert(
            "2021".to_string(),
            results(vec![
                record("한솔제지", 100.0, 40.0),
                record("무림페이퍼", 100.0, 60.0),
            ]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        write_report(&by_year, &path, &options).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(cell(&range, 0, 0), "한솔제지");
        assert_eq!(cell(&range, 4, 0), "");
        assert_eq!(cell(&range, 5, 0), "무림페이퍼");
        assert_eq!(cell(&range, 6, 0), "매출원가");
        assert_eq!(cell(&range, 6, 1), "60.00%");
    }

    #[test]
    fn test_empty_results_write_empty_workbook() {
        let by_year = BTreeMap::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        let options = ReportOptions::new(dir.path().join("charts")).without_charts();
        let summary = write_report(&by_year, &path, &options).unwrap();
        assert!(summary.companies.is_empty());
        assert!(path.exists());
    }
}

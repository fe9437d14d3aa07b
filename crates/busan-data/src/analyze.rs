//! Income-statement ratio analysis.
//!
//! Mirrors the filing layout: one row per line item, keyed by company and
//! standardized item code. Analysis filters a filing to one industry code,
//! cleans the current-period column, then computes the three ratios per
//! company. Companies missing a required line item are skipped and the
//! reason kept, so an incomplete filing never fails the whole year.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use busan::filing::{
    COMPANY_COLUMN, CURRENT_PERIOD_COLUMN, INDUSTRY_COLUMN, ITEM_CODE_COLUMN, IndustryCode,
    LineItem,
};
use busan::naming;
use busan::ratios::{LineItemValues, RatioRecord, SkipReason, SkippedCompany, YearResults};
use polars::prelude::*;

use crate::error::{DataError, Result};
use crate::excel;

/// List the income-statement workbooks in a directory, sorted by name.
///
/// Filenames are matched with [`naming::is_income_statement_file`], so
/// consolidated (연결) and comprehensive (포괄) statements are excluded.
/// A missing directory yields an empty list; the caller decides whether
/// that is worth reporting.
pub fn discover_income_statements(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(naming::is_income_statement_file)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Analyze one year's filing workbook.
///
/// See [`analyze_frame`] for the analysis itself.
pub fn analyze_filing(path: &Path, industry: IndustryCode) -> Result<YearResults> {
    let df = excel::load_filing_table(path)?;
    for column in [
        COMPANY_COLUMN,
        INDUSTRY_COLUMN,
        ITEM_CODE_COLUMN,
        CURRENT_PERIOD_COLUMN,
    ] {
        if df.get_column_names_str().iter().all(|name| *name != column) {
            return Err(DataError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    analyze_frame(df, industry)
}

/// Analyze a loaded filing table.
///
/// One lazy pass filters rows to the industry code and rewrites the
/// current-period column (thousands separators stripped, cast to floats,
/// unparseable values null) before anything reads it, so every company
/// group sees the cleaned data. Each company with all four line items
/// yields a [`RatioRecord`]; the rest are recorded as skipped.
pub fn analyze_frame(df: DataFrame, industry: IndustryCode) -> Result<YearResults> {
    let cleaned = df
        .lazy()
        .filter(col(INDUSTRY_COLUMN).eq(lit(industry.to_string())))
        .with_column(
            col(CURRENT_PERIOD_COLUMN)
                .str()
                .replace_all(lit(","), lit(""), true)
                .cast(DataType::Float64),
        )
        .collect()?;

    let companies = cleaned.column(COMPANY_COLUMN)?.str()?;
    let mut seen = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    for company in companies.into_iter().flatten() {
        if seen.insert(company) {
            order.push(company.to_string());
        }
    }

    let mut results = YearResults::default();
    for company in order {
        let group = cleaned.filter(&companies.equal(company.as_str()))?;
        match extract_line_items(&group)? {
            Ok(values) => results
                .records
                .push(RatioRecord::from_line_items(company, &values)),
            Err(reason) => results.skipped.push(SkippedCompany { company, reason }),
        }
    }
    Ok(results)
}

/// Analyze every income-statement workbook in a directory.
///
/// Returns results keyed by the year label parsed from each filename.
/// The map iterates in sorted order, which is chronological for the
/// validated 4-digit labels.
pub fn analyze_directory(
    dir: &Path,
    industry: IndustryCode,
) -> Result<BTreeMap<String, YearResults>> {
    let mut results = BTreeMap::new();
    for path in discover_income_statements(dir)? {
        let filename = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
        let year = naming::year_from_filename(filename)?;
        results.insert(year, analyze_filing(&path, industry)?);
    }
    Ok(results)
}

/// Look up the four required line items in one company's rows.
///
/// The outer `Result` is a real failure (schema breakage); the inner one
/// carries the skip reason for an incomplete company.
fn extract_line_items(
    group: &DataFrame,
) -> Result<std::result::Result<LineItemValues, SkipReason>> {
    let codes = group.column(ITEM_CODE_COLUMN)?.str()?;
    let current = group.column(CURRENT_PERIOD_COLUMN)?.f64()?;

    let lookup = |item: LineItem| -> std::result::Result<f64, SkipReason> {
        let idx = codes
            .into_iter()
            .position(|code| code == Some(item.code()))
            .ok_or(SkipReason::MissingLineItem(item))?;
        current.get(idx).ok_or(SkipReason::MissingValue(item))
    };

    Ok((|| {
        Ok(LineItemValues {
            revenue: lookup(LineItem::Revenue)?,
            cost_of_sales: lookup(LineItem::CostOfSales)?,
            sga_expenses: lookup(LineItem::SgaExpenses)?,
            operating_income: lookup(LineItem::OperatingIncome)?,
        })
    })())
}

//! Percentage ratios derived from income-statement line items.
//!
//! Every ratio is option-valued: a company with zero revenue keeps its
//! record but carries no ratios, while a company missing a required line
//! item is excluded from the kept records and listed in
//! [`YearResults::skipped`] instead.

use crate::filing::LineItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current-period values of the four required line items for one company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItemValues {
    /// Revenue (매출액)
    pub revenue: f64,
    /// Cost of sales (매출원가)
    pub cost_of_sales: f64,
    /// Selling, general and administrative expenses (판매비와관리비)
    pub sga_expenses: f64,
    /// Operating income (영업이익)
    pub operating_income: f64,
}

/// Percentage ratios for one company in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRecord {
    /// Company name (회사명).
    pub company: String,

    /// Cost of sales as a percentage of revenue.
    pub cost_of_sales_pct: Option<f64>,

    /// SG&A expenses as a percentage of revenue.
    pub sga_expenses_pct: Option<f64>,

    /// Operating income as a percentage of revenue.
    pub operating_income_pct: Option<f64>,
}

impl RatioRecord {
    /// Compute the three ratios for one company.
    ///
    /// Each ratio is `item / revenue * 100`. When revenue is exactly zero
    /// all three ratios are `None` rather than a division by zero.
    pub fn from_line_items(company: impl Into<String>, values: &LineItemValues) -> Self {
        let company = company.into();
        if values.revenue == 0.0 {
            return Self {
                company,
                cost_of_sales_pct: None,
                sga_expenses_pct: None,
                operating_income_pct: None,
            };
        }
        let pct = |item: f64| Some(item / values.revenue * 100.0);
        Self {
            company,
            cost_of_sales_pct: pct(values.cost_of_sales),
            sga_expenses_pct: pct(values.sga_expenses),
            operating_income_pct: pct(values.operating_income),
        }
    }
}

/// Why a company-year produced no ratio record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No row carried the required line-item code.
    MissingLineItem(LineItem),

    /// The line-item row exists but its current-period value is empty or
    /// not numeric.
    MissingValue(LineItem),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLineItem(item) => {
                write!(f, "missing line item {} ({})", item.code(), item)
            }
            Self::MissingValue(item) => {
                write!(f, "no current-period value for {} ({})", item.code(), item)
            }
        }
    }
}

/// A company-year excluded from the kept records, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCompany {
    /// Company name (회사명).
    pub company: String,

    /// Why the company was excluded.
    pub reason: SkipReason,
}

/// The outcome of analyzing one year's filing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearResults {
    /// Ratio records for companies with all required line items, in
    /// first-seen order.
    pub records: Vec<RatioRecord>,

    /// Companies excluded from `records`, with reasons.
    pub skipped: Vec<SkippedCompany>,
}

impl YearResults {
    /// Find the record for a company, if it was kept this year.
    pub fn record_for(&self, company: &str) -> Option<&RatioRecord> {
        self.records.iter().find(|r| r.company == company)
    }

    /// Company names of the kept records, in record order.
    pub fn companies(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.company.as_str()).collect()
    }
}

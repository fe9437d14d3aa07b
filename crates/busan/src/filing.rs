//! DART filing table layout: column names and standardized line-item codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the company name (회사명).
pub const COMPANY_COLUMN: &str = "회사명";

/// Column holding the industry classification code (업종).
pub const INDUSTRY_COLUMN: &str = "업종";

/// Column holding the standardized line-item code (항목코드).
pub const ITEM_CODE_COLUMN: &str = "항목코드";

/// Column holding the current-period value (당기), stored as text with
/// possible thousands separators.
pub const CURRENT_PERIOD_COLUMN: &str = "당기";

/// Industry classification code used to restrict analysis to one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndustryCode(pub u32);

impl IndustryCode {
    /// Sector analyzed by default (code 212 in the source exports).
    pub const DEFAULT: Self = Self(212);
}

impl fmt::Display for IndustryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for IndustryCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// Income-statement line items required for the ratio report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Revenue (매출액)
    Revenue,

    /// Cost of sales (매출원가)
    CostOfSales,

    /// Selling, general and administrative expenses (판매비와관리비)
    SgaExpenses,

    /// Operating income or loss (영업이익)
    OperatingIncome,
}

impl LineItem {
    /// Returns all required line items.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Revenue,
            Self::CostOfSales,
            Self::SgaExpenses,
            Self::OperatingIncome,
        ]
    }

    /// Returns the standardized code as it appears in the filing's
    /// 항목코드 column. Lookups match this string exactly.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Revenue => "ifrs-full_Revenue",
            Self::CostOfSales => "ifrs-full_CostOfSales",
            Self::SgaExpenses => "dart_TotalSellingGeneralAdministrativeExpenses",
            Self::OperatingIncome => "dart_OperatingIncomeLoss",
        }
    }

    /// Returns the Korean statement label for this line item.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "매출액",
            Self::CostOfSales => "매출원가",
            Self::SgaExpenses => "판매비와관리비",
            Self::OperatingIncome => "영업이익",
        }
    }

    /// Parse a line item from its standardized code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ifrs-full_Revenue" => Some(Self::Revenue),
            "ifrs-full_CostOfSales" => Some(Self::CostOfSales),
            "dart_TotalSellingGeneralAdministrativeExpenses" => Some(Self::SgaExpenses),
            "dart_OperatingIncomeLoss" => Some(Self::OperatingIncome),
            _ => None,
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/busan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod filing;
pub mod naming;
pub mod ratios;

pub use filing::{IndustryCode, LineItem};
pub use naming::{NamingError, is_income_statement_file, year_from_filename};
pub use ratios::{LineItemValues, RatioRecord, SkipReason, SkippedCompany, YearResults};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

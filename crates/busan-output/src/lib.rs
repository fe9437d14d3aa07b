#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/busan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod convert;
pub mod report;

pub use chart::{ChartError, RatioSeries, render_chart};
pub use convert::{ConvertError, write_table, xlsx_sibling};
pub use report::{ReportError, ReportOptions, ReportSummary, write_report};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

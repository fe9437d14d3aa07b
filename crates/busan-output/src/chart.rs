//! Per-company ratio line charts.
//!
//! Renders one 600×400 PNG per company: the three ratios over the report
//! years as line series with circle markers, a title, a legend and a mesh
//! grid. A year with no value breaks the line, so gaps in the data stay
//! visible instead of being interpolated away.

use std::collections::BTreeMap;
use std::path::Path;

use busan::ratios::YearResults;
use plotters::prelude::*;
use thiserror::Error;

/// Chart width in pixels.
const CHART_WIDTH: u32 = 600;

/// Chart height in pixels.
const CHART_HEIGHT: u32 = 400;

/// Errors that can occur while rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Backend drawing error.
    #[error("chart rendering error: {0}")]
    Render(String),
}

/// The three ratio series of one company across the report years.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    /// Company name.
    pub company: String,

    /// Year labels, chronological.
    pub years: Vec<String>,

    /// Cost-of-sales percentage per year.
    pub cost_of_sales: Vec<Option<f64>>,

    /// SG&A percentage per year.
    pub sga_expenses: Vec<Option<f64>>,

    /// Operating-income percentage per year.
    pub operating_income: Vec<Option<f64>>,
}

impl RatioSeries {
    /// Collect one company's series from the per-year results.
    ///
    /// A year where the company was skipped, or where its revenue was zero,
    /// contributes `None` to each series.
    pub fn from_results(company: &str, results_by_year: &BTreeMap<String, YearResults>) -> Self {
        let mut series = Self {
            company: company.to_string(),
            years: Vec::new(),
            cost_of_sales: Vec::new(),
            sga_expenses: Vec::new(),
            operating_income: Vec::new(),
        };
        for (year, results) in results_by_year {
            let record = results.record_for(company);
            series.years.push(year.clone());
            series
                .cost_of_sales
                .push(record.and_then(|r| r.cost_of_sales_pct));
            series
                .sga_expenses
                .push(record.and_then(|r| r.sga_expenses_pct));
            series
                .operating_income
                .push(record.and_then(|r| r.operating_income_pct));
        }
        series
    }

    /// All values present across the three series.
    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cost_of_sales
            .iter()
            .chain(&self.sga_expenses)
            .chain(&self.operating_income)
            .copied()
            .flatten()
    }
}

/// Chart image filename for a company.
pub fn chart_filename(company: &str) -> String {
    format!("{company}_graph.png")
}

/// Split a series into contiguous runs of present values.
///
/// Each run is a list of `(year index, value)` points; missing years end
/// the current run.
fn segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (idx, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((idx as f64, *v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render a company's ratio chart to a PNG file.
///
/// The file is overwritten if it already exists, so a rerun refreshes the
/// chart in place.
///
/// # Errors
///
/// Returns [`ChartError::Render`] if the backend cannot draw or the file
/// cannot be written.
pub fn render_chart(series: &RatioSeries, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (y_min, y_max) = y_range(series);
    let x_max = (series.years.len().saturating_sub(1)) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} - 연도별 재무 비율", series.company),
            ("sans-serif", 20),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.2..x_max + 0.2, y_min..y_max)
        .map_err(render_err)?;

    let years = series.years.clone();
    chart
        .configure_mesh()
        .x_desc("연도")
        .y_desc("비율 (%)")
        .x_labels(series.years.len().max(2))
        .x_label_formatter(&move |x| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                years.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(render_err)?;

    let lines: [(&str, &[Option<f64>], RGBColor); 3] = [
        ("매출원가", &series.cost_of_sales, RED),
        ("판관비", &series.sga_expenses, BLUE),
        ("영업이익", &series.operating_income, GREEN),
    ];
    for (label, values, color) in lines {
        for (run_idx, run) in segments(values).into_iter().enumerate() {
            let drawn = chart
                .draw_series(
                    LineSeries::new(run, color.stroke_width(2)).point_size(3),
                )
                .map_err(render_err)?;
            // one legend entry per series, not per run
            if run_idx == 0 {
                drawn
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Y axis bounds with a small margin around the observed values.
fn y_range(series: &RatioSeries) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in series.values() {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 100.0);
    }
    let pad = ((max - min) * 0.1).max(1.0);
    (min - pad, max + pad)
}

/// Convert any plotters error into a [`ChartError`].
fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

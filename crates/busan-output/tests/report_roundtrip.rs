//! Report assembly over several years of results.

use busan::ratios::{LineItemValues, RatioRecord, YearResults};
use busan_output::{ReportOptions, write_report};
use calamine::{Reader, Xlsx, open_workbook};
use std::collections::BTreeMap;

fn record(company: &str, revenue: f64) -> RatioRecord {
    RatioRecord::from_line_items(
        company,
        &LineItemValues {
            revenue,
            cost_of_sales: revenue * 0.4,
            sga_expenses: revenue * 0.1,
            operating_income: revenue * 0.2,
        },
    )
}

fn results(records: Vec<RatioRecord>) -> YearResults {
    YearResults {
        records,
        skipped: Vec::new(),
    }
}

#[test]
fn test_three_year_report() {
    let mut by_year = BTreeMap::new();
    by_year.insert(
        "2021".to_string(),
        results(vec![record("한솔제지", 1000.0), record("무림페이퍼", 500.0)]),
    );
    // 무림페이퍼 drops out in 2022, returns in 2023
    by_year.insert("2022".to_string(), results(vec![record("한솔제지", 1100.0)]));
    by_year.insert(
        "2023".to_string(),
        results(vec![record("한솔제지", 1200.0), record("무림페이퍼", 600.0)]),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.xlsx");
    let options = ReportOptions::new(dir.path().join("charts")).without_charts();
    let summary = write_report(&by_year, &path, &options).unwrap();

    assert_eq!(summary.companies, vec!["한솔제지", "무림페이퍼"]);
    assert_eq!(summary.years, vec!["2021", "2022", "2023"]);

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let cell = |row: u32, col: u32| {
        range
            .get_value((row, col))
            .map(ToString::to_string)
            .unwrap_or_default()
    };

    // first block: 한솔제지, all years present
    assert_eq!(cell(0, 0), "한솔제지");
    assert_eq!(cell(0, 3), "2023년");
    assert_eq!(cell(1, 1), "40.00%");
    assert_eq!(cell(1, 3), "40.00%");

    // second block: 무림페이퍼 with an N/A gap in 2022
    assert_eq!(cell(5, 0), "무림페이퍼");
    assert_eq!(cell(6, 1), "40.00%");
    assert_eq!(cell(6, 2), "N/A");
    assert_eq!(cell(6, 3), "40.00%");
    assert_eq!(cell(8, 0), "영업이익");
    assert_eq!(cell(8, 2), "N/A");
}

#[test]
#[ignore = "needs a system font for chart text rendering"]
fn test_report_with_embedded_charts() {
    let mut by_year = BTreeMap::new();
    by_year.insert("2021".to_string(), results(vec![record("한솔제지", 1000.0)]));
    by_year.insert("2022".to_string(), results(vec![record("한솔제지", 1100.0)]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.xlsx");
    let charts_dir = dir.path().join("charts");
    let options = ReportOptions::new(&charts_dir);
    write_report(&by_year, &path, &options).unwrap();

    assert!(path.exists());
    assert!(charts_dir.join("한솔제지_graph.png").exists());
}

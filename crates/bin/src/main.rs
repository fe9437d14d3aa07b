//! busan CLI binary.
//!
//! Converts DART filing text exports to xlsx workbooks and builds the
//! consolidated income-statement ratio report.

use busan::filing::IndustryCode;
use busan_data::{analyze, encoding, text};
use busan_output::{ReportOptions, convert, report};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "busan")]
#[command(about = "DART filing conversion and income-statement ratio reporting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert tab-delimited .txt filing exports to .xlsx
    Convert {
        /// Directory containing the .txt exports
        dir: PathBuf,
    },

    /// Build the consolidated ratio report with per-company charts
    Report {
        /// Directory containing the yearly income-statement workbooks
        dir: PathBuf,

        /// Report workbook path
        #[arg(long, default_value = "result.xlsx")]
        output: PathBuf,

        /// Industry code to analyze
        #[arg(long, default_value_t = 212)]
        industry: u32,

        /// Directory for the per-company chart images
        #[arg(long, default_value = "charts")]
        charts_dir: PathBuf,

        /// Skip chart rendering and embedding
        #[arg(long)]
        no_charts: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { dir } => convert_directory(&dir),
        Commands::Report {
            dir,
            output,
            industry,
            charts_dir,
            no_charts,
        } => build_report(&dir, &output, IndustryCode(industry), charts_dir, no_charts),
    }
}

/// Convert every `.txt` export in the directory.
///
/// Failures are isolated per file: a file that cannot be decoded or
/// written is reported and the loop moves on.
fn convert_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = text::discover_text_files(dir)?;
    if files.is_empty() {
        println!("No .txt files found in {}", dir.display());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );

    let mut converted = 0usize;
    let mut failed = 0usize;
    for path in &files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<non-utf8 name>");
        pb.set_message(name.to_string());
        match convert_file(path) {
            Ok(target) => {
                converted += 1;
                pb.println(format!(
                    "converted: {} -> {}",
                    name,
                    target
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("<non-utf8 name>")
                ));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("failed: {}: {}", name, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("{} converted, {} failed", converted, failed);
    Ok(())
}

/// Convert one text export to its `.xlsx` sibling.
fn convert_file(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let decoded = encoding::read_to_string(path)?;
    let table = text::TextTable::parse(&decoded);
    let target = convert::xlsx_sibling(path);
    convert::write_table(&table.rows, &target)?;
    Ok(target)
}

/// Analyze the yearly workbooks and write the consolidated report.
fn build_report(
    dir: &Path,
    output: &Path,
    industry: IndustryCode,
    charts_dir: PathBuf,
    no_charts: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = analyze::discover_income_statements(dir)?;
    if files.is_empty() {
        println!("No income-statement workbooks found in {}", dir.display());
        return Ok(());
    }

    println!("Analyzing {} workbooks (industry {}):", files.len(), industry);
    for path in &files {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            println!("  {}", name);
        }
    }

    let results = analyze::analyze_directory(dir, industry)?;

    let mut skipped_total = 0usize;
    for (year, year_results) in &results {
        for skip in &year_results.skipped {
            skipped_total += 1;
            println!("skipped {} ({}): {}", skip.company, year, skip.reason);
        }
    }
    if skipped_total > 0 {
        println!("{} company-year(s) skipped", skipped_total);
    }

    let mut options = ReportOptions::new(charts_dir);
    if no_charts {
        options = options.without_charts();
    }
    let summary = report::write_report(&results, output, &options)?;
    println!(
        "Report written to {} ({} companies, {} years)",
        summary.output_path.display(),
        summary.companies.len(),
        summary.years.len()
    );
    Ok(())
}

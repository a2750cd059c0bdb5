//! Batch command - inspect many saved pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use helio_core::{HelioConfig, HtmlSnapshot, PageReport, inspect};

use super::output::{OutputFormat, SUMMARY_HEADER, format_report};
use super::{is_html_file, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of inspecting a single file.
struct FileResult {
    path: PathBuf,
    report: Option<PageReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn status(&self) -> &'static str {
        match &self.report {
            Some(report) if report.has_date() => "found",
            Some(_) => "no_date",
            None => "error",
        }
    }

    fn file_name(&self) -> &str {
        self.path.file_name().and_then(|s| s.to_str()).unwrap_or("")
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(load_config(config_path)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_html_file(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to inspect",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One blocking worker per page, at most `jobs` at once.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let config = Arc::clone(&config);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = inspect_file(&path, &config);

            let (report, error) = match outcome {
                Ok(report) => (Some(report), None),
                Err(e) => (None, Some(e.to_string())),
            };

            (
                index,
                FileResult {
                    path,
                    report,
                    error,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                },
            )
        });
    }

    let mut indexed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        indexed.push(joined?);
        overall_pb.inc(1);
    }
    overall_pb.finish_with_message("Complete");

    indexed.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = indexed.into_iter().map(|(_, result)| result).collect();

    for result in &results {
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to inspect {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to inspect {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Inspection failed: {}", error_msg);
            }
        }
    }

    for result in &results {
        let Some(report) = &result.report else {
            continue;
        };

        match &args.output_dir {
            Some(output_dir) => {
                let output_name = result.path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("page");
                let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_report(report, args.format, false)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                let label = report.label.as_deref().unwrap_or("no date");
                println!("{}: {}", result.path.display(), label);
            }
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let found = results.iter().filter(|r| r.status() == "found").count();
    let missing = results.iter().filter(|r| r.status() == "no_date").count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Inspected {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} dated, {} without date, {} failed",
        style(found).green(),
        style(missing).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn inspect_file(path: &Path, config: &HelioConfig) -> anyhow::Result<PageReport> {
    let doc = HtmlSnapshot::parse_bytes(&fs::read(path)?);
    Ok(inspect(&doc, config))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(SUMMARY_HEADER)?;

    for result in results {
        let time_ms = result.processing_time_ms.to_string();

        match &result.report {
            Some(report) => {
                let strategy = report.strategy.map(|s| s.name()).unwrap_or("");
                wtr.write_record([
                    result.file_name(),
                    result.status(),
                    report.title.as_str(),
                    report.date_string.as_str(),
                    report.label.as_deref().unwrap_or(""),
                    report.badge.as_deref().unwrap_or(""),
                    strategy,
                    time_ms.as_str(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    result.file_name(),
                    result.status(),
                    "",
                    "",
                    "",
                    "",
                    "",
                    time_ms.as_str(),
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

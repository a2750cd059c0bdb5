//! Inspect command - find the publication date of a single saved page.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use helio_core::{HtmlSnapshot, inspect};

use super::load_config;
use super::output::{OutputFormat, format_report};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// HTML file to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// URL the page was loaded from; its fragment selects the hash target
    #[arg(short, long)]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which strategy found the date
    #[arg(long)]
    explain: bool,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Inspecting file: {}", args.input.display());

    let doc = HtmlSnapshot::from_file(&args.input, args.url.as_deref())?;
    let report = inspect(&doc, &config);

    if !report.has_date() {
        eprintln!(
            "{} No publication date found in {}",
            style("⚠").yellow(),
            args.input.display()
        );
    }

    if args.explain {
        match report.strategy {
            Some(strategy) => eprintln!(
                "{} Date string {:?} found by the {} strategy",
                style("ℹ").blue(),
                report.date_string,
                strategy
            ),
            None => eprintln!("{} No strategy matched", style("ℹ").blue()),
        }
    }

    let output = format_report(&report, args.format, args.explain)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

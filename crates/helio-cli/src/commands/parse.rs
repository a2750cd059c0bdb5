//! Parse command - normalize raw date strings.

use clap::Args;

use helio_core::DateParser;

use super::output::{OutputFormat, ParseOutcome, format_outcomes};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Raw date strings, e.g. "March 19th, 1984" or "2001年1月1日"
    #[arg(required = true)]
    raw: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    let parser = DateParser::new();

    let outcomes: Vec<ParseOutcome> = args
        .raw
        .iter()
        .map(|raw| ParseOutcome::new(raw, parser.parse(raw)))
        .collect();

    println!("{}", format_outcomes(&outcomes, args.format)?);

    Ok(())
}

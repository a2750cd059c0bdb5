//! Output formats shared by the subcommands.

use serde::Serialize;

use helio_core::{PageReport, ParsedDate};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-file outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

const REPORT_HEADER: [&str; 7] = ["url", "title", "date_string", "label", "badge", "strategy", "found"];

fn report_record(report: &PageReport) -> [String; 7] {
    [
        report.url.clone().unwrap_or_default(),
        report.title.clone(),
        report.date_string.clone(),
        report.label.clone().unwrap_or_default(),
        report.badge.clone().unwrap_or_default(),
        report.strategy.map(|s| s.name().to_string()).unwrap_or_default(),
        report.has_date().to_string(),
    ]
}

/// Render one page report.
pub fn format_report(report: &PageReport, format: OutputFormat, explain: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(REPORT_HEADER)?;
            wtr.write_record(report_record(report))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_report_text(report, explain)),
    }
}

fn format_report_text(report: &PageReport, explain: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Title: {}\n", report.title));
    if let Some(url) = &report.url {
        output.push_str(&format!("URL: {}\n", url));
    }
    output.push_str(&format!("Date string: {}\n", report.date_string));

    match (&report.label, &report.badge) {
        (Some(label), Some(badge)) => output.push_str(&format!("Date: {} (badge {})\n", label, badge)),
        _ => output.push_str("Date: none\n"),
    }

    if explain {
        let strategy = report.strategy.map(|s| s.name()).unwrap_or("none");
        output.push_str(&format!("Strategy: {}\n", strategy));
    }

    output
}

/// A raw string and what it parsed to.
#[derive(Debug, Serialize)]
pub struct ParseOutcome {
    pub raw: String,
    pub date: Option<ParsedDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl ParseOutcome {
    pub fn new(raw: &str, date: Option<ParsedDate>) -> Self {
        Self {
            raw: raw.to_string(),
            label: date.as_ref().map(ParsedDate::label),
            badge: date.as_ref().map(ParsedDate::badge_text),
            date,
        }
    }
}

/// Render parse outcomes.
pub fn format_outcomes(outcomes: &[ParseOutcome], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcomes)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["raw", "year", "month", "day", "label", "badge"])?;
            for outcome in outcomes {
                let (year, month, day) = match &outcome.date {
                    Some(d) => (d.year.as_str(), d.month.as_str(), d.day.as_str()),
                    None => ("", "", ""),
                };
                wtr.write_record([
                    outcome.raw.as_str(),
                    year,
                    month,
                    day,
                    outcome.label.as_deref().unwrap_or(""),
                    outcome.badge.as_deref().unwrap_or(""),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let lines: Vec<String> = outcomes
                .iter()
                .map(|o| match (&o.label, &o.badge) {
                    (Some(label), Some(badge)) => format!("{} -> {} ({})", o.raw, label, badge),
                    _ => format!("{} -> no date", o.raw),
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Summary CSV header for batch runs.
pub const SUMMARY_HEADER: [&str; 9] = [
    "filename",
    "status",
    "title",
    "date_string",
    "label",
    "badge",
    "strategy",
    "processing_time_ms",
    "error",
];

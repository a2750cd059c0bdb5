//! Date string parsing.
//!
//! Three grammars are tried in a fixed order and the first one matching
//! anywhere in the input wins: numeric year-first (including Japanese
//! 年/月/日 separators), month-name day year, and day month-name year.
//! Nothing is validated against the calendar.

pub mod patterns;

use regex::{Captures, Regex};
use tracing::trace;

use crate::models::date::ParsedDate;
use patterns::{DAY_MONTH_YEAR, MONTH_DAY_YEAR, YEAR_FIRST, month_number};

/// Parses raw date strings into [`ParsedDate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the first recognized date in `raw`.
    pub fn parse(&self, raw: &str) -> Option<ParsedDate> {
        let patterns: [&Regex; 3] = [&YEAR_FIRST, &MONTH_DAY_YEAR, &DAY_MONTH_YEAR];

        let date = patterns
            .iter()
            .find_map(|pattern| pattern.captures(raw))
            .and_then(|caps| from_captures(&caps));

        trace!("parsed {:?} as {:?}", raw, date);
        date
    }
}

fn from_captures(caps: &Captures<'_>) -> Option<ParsedDate> {
    let year = caps.name("year")?.as_str();
    let month = caps.name("month")?.as_str();
    let day = caps.name("day")?.as_str();

    let month = if month.bytes().all(|b| b.is_ascii_digit()) {
        month
    } else {
        month_number(month)?
    };
    Some(ParsedDate::new(year, month, day))
}

/// Parse a raw date string.
pub fn parse_date(raw: &str) -> Option<ParsedDate> {
    DateParser::new().parse(raw)
}

//! Date grammars, in the order they are tried.

use lazy_static::lazy_static;
use regex::Regex;

// Month names and ordinal suffixes are ASCII case-insensitive only.
lazy_static! {
    // "2001-01-01", "2001/1/1", "2001.01.01", "2001年1月1日"
    pub static ref YEAR_FIRST: Regex = Regex::new(
        r"(?P<year>[0-9]{4})[-/.年](?P<month>[0-9]{1,2})[-/.月](?P<day>[0-9]{1,2})日?"
    ).unwrap();

    // "March 19th, 1984", "Mar. 19, 1984"
    pub static ref MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?P<month>(?i-u:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec))\.?(?i-u:[a-y]{0,6})\s+(?P<day>[0-9]{1,2})(?i-u:st|nd|rd|th)?,?\s+(?P<year>[0-9]{4})"
    ).unwrap();

    // "19th March 1984", "19 Mar 1984"
    pub static ref DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?P<day>[0-9]{1,2})(?i-u:st|nd|rd|th)?\s+(?P<month>(?i-u:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec))\.?(?i-u:[a-y]{0,6}),?\s+(?P<year>[0-9]{4})"
    ).unwrap();
}

/// Two-digit month for an English month abbreviation.
pub fn month_number(name: &str) -> Option<&'static str> {
    let number = match name.to_ascii_lowercase().as_str() {
        "jan" => "01",
        "feb" => "02",
        "mar" => "03",
        "apr" => "04",
        "may" => "05",
        "jun" => "06",
        "jul" => "07",
        "aug" => "08",
        "sep" => "09",
        "oct" => "10",
        "nov" => "11",
        "dec" => "12",
        _ => return None,
    };
    Some(number)
}

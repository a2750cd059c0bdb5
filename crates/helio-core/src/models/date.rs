//! Canonical publication date and its display forms.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A publication date normalized to zero-padded strings.
///
/// Month and day are always two digits. The year is whatever four digits the
/// source contained; no range or calendar validation is applied, so
/// `2001-13-32` is representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedDate {
    /// Four-digit year, passed through verbatim.
    pub year: String,
    /// Two-digit month ("01" - "12" for month-name input).
    pub month: String,
    /// Two-digit day.
    pub day: String,
}

impl ParsedDate {
    /// Build a date, zero-padding month and day to width 2.
    pub fn new(year: impl Into<String>, month: &str, day: &str) -> Self {
        Self {
            year: year.into(),
            month: pad2(month),
            day: pad2(day),
        }
    }

    /// Full label, e.g. `2024-03-09`.
    pub fn label(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }

    /// Compact badge text, see [`format_badge_text`].
    pub fn badge_text(&self) -> String {
        format_badge_text(&self.month, &self.day)
    }

    /// Interpret as a real calendar date, if it is one.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let year: i32 = self.year.parse().ok()?;
        let month: u32 = self.month.parse().ok()?;
        let day: u32 = self.day.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Whether the date exists in the proleptic Gregorian calendar.
    pub fn is_calendar_date(&self) -> bool {
        self.to_naive_date().is_some()
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Format month and day for the toolbar badge.
///
/// Prefers the short `M/D` form ("1/1" over "0101"); when that reaches five
/// characters the separator is dropped ("1212" over "12/12").
pub fn format_badge_text(month: &str, day: &str) -> String {
    let month_day = format!("{}/{}", unpad(month), unpad(day));
    if month_day.chars().count() < 5 {
        month_day
    } else {
        month_day.replace('/', "")
    }
}

fn pad2(s: &str) -> String {
    format!("{:0>2}", s)
}

fn unpad(s: &str) -> String {
    match s.trim().parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_pads_month_and_day() {
        let date = ParsedDate::new("2001", "1", "9");
        assert_eq!(date.month, "01");
        assert_eq!(date.day, "09");
        assert_eq!(date.year, "2001");
    }

    #[test]
    fn test_new_keeps_two_digit_values() {
        let date = ParsedDate::new("1984", "12", "31");
        assert_eq!(date.label(), "1984-12-31");
    }

    #[test]
    fn test_badge_short_form() {
        assert_eq!(format_badge_text("01", "01"), "1/1");
        assert_eq!(format_badge_text("03", "19"), "3/19");
        assert_eq!(format_badge_text("11", "02"), "11/2");
    }

    #[test]
    fn test_badge_drops_separator_at_five_chars() {
        assert_eq!(format_badge_text("12", "12"), "1212");
        assert_eq!(format_badge_text("10", "31"), "1031");
    }

    #[test]
    fn test_badge_from_parsed_date() {
        let date = ParsedDate::new("2024", "7", "4");
        assert_eq!(date.badge_text(), "7/4");
    }

    #[test]
    fn test_calendar_check_is_separate_from_parsing() {
        let lenient = ParsedDate::new("2001", "13", "32");
        assert_eq!(lenient.label(), "2001-13-32");
        assert!(!lenient.is_calendar_date());

        let real = ParsedDate::new("2024", "2", "29");
        assert_eq!(real.to_naive_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_display_matches_label() {
        let date = ParsedDate::new("2020", "5", "17");
        assert_eq!(date.to_string(), date.label());
    }

    #[test]
    fn test_serializes_as_string_triple() {
        let date = ParsedDate::new("2001", "1", "1");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"year":"2001","month":"01","day":"01"}"#);
    }
}

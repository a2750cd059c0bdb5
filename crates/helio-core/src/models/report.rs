//! Per-page date report.

use serde::{Deserialize, Serialize};

use super::date::ParsedDate;
use crate::finder::Strategy;

/// Everything known about a page's publication date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    /// Page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page title, or the configured placeholder.
    pub title: String,

    /// Raw date string as found, or the configured placeholder.
    pub date_string: String,

    /// Parsed date.
    pub date: Option<ParsedDate>,

    /// Strategy that found the date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,

    /// `YYYY-MM-DD` label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Badge text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl PageReport {
    /// Whether a date was both found and parsed.
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

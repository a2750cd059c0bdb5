//! Core library for publication date extraction.
//!
//! This crate provides:
//! - A read-only document abstraction (selector queries, text, attributes, URL fragment)
//! - The ordered date-finding strategies (hash target, JSON-LD, meta tags, element text)
//! - Date string parsing into a canonical `{year, month, day}` record
//! - Page reports with label and badge text, plus configuration

pub mod error;
pub mod models;
pub mod document;
pub mod finder;
pub mod parser;
pub mod report;

pub use error::{HelioError, Result};
pub use models::date::{ParsedDate, format_badge_text};
pub use models::config::{HelioConfig, FinderConfig, ReportConfig};
pub use models::report::PageReport;
pub use document::{DocumentSnapshot, ElementHandle};
#[cfg(feature = "html")]
pub use document::html::HtmlSnapshot;
pub use finder::{DateFinder, FoundDate, Strategy, find_date};
pub use parser::{DateParser, parse_date};
pub use report::inspect;
#[cfg(feature = "html")]
pub use report::inspect_html;

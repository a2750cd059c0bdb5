//! Configuration structures for date finding and reporting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HelioError, Result};

/// Main configuration for heliotropium.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelioConfig {
    /// Which finder strategies run.
    pub finder: FinderConfig,

    /// Page report presentation.
    pub report: ReportConfig,
}

/// Date finder configuration.
///
/// Disabling a strategy skips it; the relative order of the others never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Search inside the element addressed by the URL fragment.
    pub hash_target: bool,

    /// Search JSON-LD structured data blocks.
    pub json_ld: bool,

    /// Search meta tags and time element attributes.
    pub meta_elements: bool,

    /// Search visible text of date-like elements.
    pub content_elements: bool,

    /// Unwrap `<![CDATA[ ... ]]>` around JSON-LD script bodies.
    pub strip_cdata: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            hash_target: true,
            json_ld: true,
            meta_elements: true,
            content_elements: true,
            strip_cdata: true,
        }
    }
}

/// Page report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title used when the page has none.
    pub untitled: String,

    /// Date string used when no date was found.
    pub missing_date: String,

    /// Warn when a parsed date does not exist in the calendar.
    pub warn_invalid_calendar: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            untitled: "Untitled".to_string(),
            missing_date: "N/A".to_string(),
            warn_invalid_calendar: true,
        }
    }
}

impl HelioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HelioError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod inspect;
pub mod output;
pub mod parse;

use std::path::{Path, PathBuf};

use tracing::debug;

use helio_core::HelioConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("heliotropium")
        .join("config.json")
}

/// Resolve the config file: explicit `--config`, else the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicitly given path must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<HelioConfig> {
    let path = config_path(explicit);

    if path.exists() {
        debug!("Loading config from {}", path.display());
        return Ok(HelioConfig::from_file(&path)?);
    }

    if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Ok(HelioConfig::default())
}

/// Whether a path looks like a saved HTML page.
pub fn is_html_file(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    matches!(extension.as_str(), "html" | "htm" | "xhtml")
}

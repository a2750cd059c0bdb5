//! Page inspection: find, parse and describe a page's publication date.

use tracing::{info, warn};

use crate::document::DocumentSnapshot;
use crate::finder::DateFinder;
use crate::models::config::HelioConfig;
use crate::models::report::PageReport;
use crate::parser::DateParser;

/// Run the finder and parser over a document and build its report.
pub fn inspect<D: DocumentSnapshot>(doc: &D, config: &HelioConfig) -> PageReport {
    let url = doc.url();
    let title = doc.title().unwrap_or_else(|| config.report.untitled.clone());

    let Some(found) = DateFinder::from_config(config.finder.clone()).find_with_source(doc) else {
        info!("no date string found for {}", url.as_deref().unwrap_or("page"));
        return PageReport {
            url,
            title,
            date_string: config.report.missing_date.clone(),
            date: None,
            strategy: None,
            label: None,
            badge: None,
        };
    };

    let date = DateParser::new().parse(&found.value);
    match &date {
        Some(date) if config.report.warn_invalid_calendar && !date.is_calendar_date() => {
            warn!("{} is not a calendar date (from {:?})", date, found.value);
        }
        Some(_) => {}
        None => info!("date string {:?} did not match any date format", found.value),
    }

    PageReport {
        url,
        title,
        label: date.as_ref().map(|d| d.label()),
        badge: date.as_ref().map(|d| d.badge_text()),
        date,
        date_string: found.value,
        strategy: Some(found.strategy),
    }
}

/// Parse an HTML string and inspect it.
#[cfg(feature = "html")]
pub fn inspect_html(
    source: &str,
    url: Option<&str>,
    config: &HelioConfig,
) -> crate::error::Result<PageReport> {
    use crate::document::html::HtmlSnapshot;

    let doc = match url {
        Some(url) => HtmlSnapshot::parse_with_url(source, url)?,
        None => HtmlSnapshot::parse(source),
    };
    Ok(inspect(&doc, config))
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use crate::finder::Strategy;
    use crate::models::date::ParsedDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_with_date() {
        let html = r#"<html><head><title>Release notes</title>
            <meta property="og:published_time" content="2012-12-12T00:00:00Z">
        </head></html>"#;
        let report = inspect_html(html, Some("https://example.com/notes"), &HelioConfig::default()).unwrap();

        assert_eq!(report.url.as_deref(), Some("https://example.com/notes"));
        assert_eq!(report.title, "Release notes");
        assert_eq!(report.date_string, "2012-12-12T00:00:00Z");
        assert_eq!(report.date, Some(ParsedDate::new("2012", "12", "12")));
        assert_eq!(report.strategy, Some(Strategy::MetaElements));
        assert_eq!(report.label.as_deref(), Some("2012-12-12"));
        assert_eq!(report.badge.as_deref(), Some("1212"));
        assert!(report.has_date());
    }

    #[test]
    fn test_report_without_date_uses_placeholders() {
        let report = inspect_html("<p>nothing</p>", None, &HelioConfig::default()).unwrap();

        assert_eq!(report.title, "Untitled");
        assert_eq!(report.date_string, "N/A");
        assert_eq!(report.date, None);
        assert_eq!(report.badge, None);
        assert!(!report.has_date());
    }

    #[test]
    fn test_unparsable_date_string_is_kept() {
        let html = r#"<span class="date">yesterday</span>"#;
        let report = inspect_html(html, None, &HelioConfig::default()).unwrap();

        assert_eq!(report.date_string, "yesterday");
        assert_eq!(report.strategy, Some(Strategy::ElementContent));
        assert_eq!(report.date, None);
    }

    #[test]
    fn test_report_json_shape() {
        let html = r#"<time datetime="2001-01-01">New year</time>"#;
        let report = inspect_html(html, None, &HelioConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["dateString"], "2001-01-01");
        assert_eq!(json["date"]["month"], "01");
        assert_eq!(json["badge"], "1/1");
        assert_eq!(json["strategy"], "meta-elements");
        assert!(json.get("url").is_none());
    }
}

//! Publication date finder.
//!
//! Strategies run in a fixed order and the first non-empty raw date wins:
//!
//! 1. inside the element addressed by the URL fragment (a linked comment or
//!    revision reports its own date, not the page's);
//! 2. JSON-LD structured data;
//! 3. meta tags and `datetime` attributes;
//! 4. visible text of date-like elements.

pub mod jsonld;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentSnapshot;
use crate::models::config::FinderConfig;

pub use rules::SelectorRule;

/// One date-finding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Element targeted by the URL fragment.
    HashTarget,
    /// JSON-LD `script` blocks.
    JsonLd,
    /// Meta tags and time element attributes.
    MetaElements,
    /// Text content of date-like elements.
    ElementContent,
}

impl Strategy {
    /// Every strategy, in the order they are tried.
    pub const ORDER: [Strategy; 4] = [
        Strategy::HashTarget,
        Strategy::JsonLd,
        Strategy::MetaElements,
        Strategy::ElementContent,
    ];

    /// Short name used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::HashTarget => "hash-target",
            Strategy::JsonLd => "json-ld",
            Strategy::MetaElements => "meta-elements",
            Strategy::ElementContent => "element-content",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw date and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundDate {
    pub value: String,
    pub strategy: Strategy,
}

/// Finds the raw publication date string of a document.
#[derive(Debug, Clone, Default)]
pub struct DateFinder {
    config: FinderConfig,
}

impl DateFinder {
    /// Create a finder with every strategy enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder from configuration.
    pub fn from_config(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Enable or disable the hash target strategy.
    pub fn with_hash_target(mut self, enabled: bool) -> Self {
        self.config.hash_target = enabled;
        self
    }

    /// Enable or disable the JSON-LD strategy.
    pub fn with_json_ld(mut self, enabled: bool) -> Self {
        self.config.json_ld = enabled;
        self
    }

    /// Enable or disable the meta/time attribute strategy.
    pub fn with_meta_elements(mut self, enabled: bool) -> Self {
        self.config.meta_elements = enabled;
        self
    }

    /// Enable or disable the element text strategy.
    pub fn with_content_elements(mut self, enabled: bool) -> Self {
        self.config.content_elements = enabled;
        self
    }

    /// Whether a strategy will run.
    pub fn is_enabled(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::HashTarget => self.config.hash_target,
            Strategy::JsonLd => self.config.json_ld,
            Strategy::MetaElements => self.config.meta_elements,
            Strategy::ElementContent => self.config.content_elements,
        }
    }

    /// Raw publication date string, if any strategy finds one.
    pub fn find<D: DocumentSnapshot>(&self, doc: &D) -> Option<String> {
        self.find_with_source(doc).map(|found| found.value)
    }

    /// Like [`DateFinder::find`], also reporting which strategy matched.
    pub fn find_with_source<D: DocumentSnapshot>(&self, doc: &D) -> Option<FoundDate> {
        for strategy in Strategy::ORDER {
            if !self.is_enabled(strategy) {
                continue;
            }

            match self.run(strategy, doc) {
                Some(value) => {
                    debug!(strategy = strategy.name(), "found date string {:?}", value);
                    return Some(FoundDate { value, strategy });
                }
                None => debug!(strategy = strategy.name(), "no date"),
            }
        }

        debug!("no date string found");
        None
    }

    fn run<D: DocumentSnapshot>(&self, strategy: Strategy, doc: &D) -> Option<String> {
        match strategy {
            Strategy::HashTarget => rules::find_in_hash_target(doc),
            Strategy::JsonLd => jsonld::find_in_json_ld(doc, self.config.strip_cdata),
            Strategy::MetaElements => rules::find_in_meta_elements(doc),
            Strategy::ElementContent => rules::find_in_element_content(doc),
        }
    }
}

/// Find a raw publication date with the default strategies.
pub fn find_date<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    DateFinder::new().find(doc)
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use crate::document::html::HtmlSnapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_ld_precedes_meta_date() {
        let doc = HtmlSnapshot::parse(
            r#"<html><head>
                <meta name="date" content="1999-09-09">
                <script type="application/ld+json">
                    {"@type": "NewsArticle", "datePublished": "2020-10-10T10:10:10+09:00"}
                </script>
            </head><body></body></html>"#,
        );

        let found = DateFinder::new().find_with_source(&doc).unwrap();
        assert_eq!(found.value, "2020-10-10T10:10:10+09:00");
        assert_eq!(found.strategy, Strategy::JsonLd);
    }

    #[test]
    fn test_hash_target_precedes_page_meta() {
        let html = r#"<html><head>
                <meta property="article:published_time" content="2000-01-01">
            </head><body>
                <div id="comment-2"><relative-time datetime="2024-05-06T07:08:09Z">May 6</relative-time></div>
            </body></html>"#;
        let doc = HtmlSnapshot::parse_with_url(html, "https://example.com/issues/1#comment-2").unwrap();

        let found = DateFinder::new().find_with_source(&doc).unwrap();
        assert_eq!(found.value, "2024-05-06T07:08:09Z");
        assert_eq!(found.strategy, Strategy::HashTarget);
    }

    #[test]
    fn test_unresolved_fragment_falls_back() {
        let html = r#"<html><head>
                <meta property="article:published_time" content="2000-01-01">
            </head><body><div id="a"><time datetime="2024-01-01"></time></div></body></html>"#;
        let doc = HtmlSnapshot::parse_with_url(html, "https://example.com/#no.such[id").unwrap();

        assert_eq!(find_date(&doc), Some("2000-01-01".to_string()));
    }

    #[test]
    fn test_hash_target_scope_excludes_rest_of_page() {
        let html = r#"<body>
                <time datetime="2001-01-01">outside</time>
                <div id="note"><span class="date">2002-02-02</span></div>
            </body>"#;
        let doc = HtmlSnapshot::parse_with_url(html, "https://example.com/#note").unwrap();

        assert_eq!(find_date(&doc), Some("2002-02-02".to_string()));
    }

    #[test]
    fn test_malformed_json_ld_does_not_abort() {
        let doc = HtmlSnapshot::parse(
            r#"<head>
                <script type="application/ld+json">{ "@type": "Article", </script>
                <script type="application/ld+json">{"@type": "Article", "datePublished": "2019-01-02"}</script>
            </head>"#,
        );
        assert_eq!(find_date(&doc), Some("2019-01-02".to_string()));

        let only_bad = HtmlSnapshot::parse(
            r#"<head><script type="application/ld+json">{ broken</script></head>"#,
        );
        assert_eq!(find_date(&only_bad), None);
    }

    #[test]
    fn test_content_fallback() {
        let doc = HtmlSnapshot::parse(r#"<body><p class="post_date">Posted March 3rd, 2015</p></body>"#);

        let found = DateFinder::new().find_with_source(&doc).unwrap();
        assert_eq!(found.value, "Posted March 3rd, 2015");
        assert_eq!(found.strategy, Strategy::ElementContent);
    }

    #[test]
    fn test_disabled_strategy_is_skipped() {
        let doc = HtmlSnapshot::parse(
            r#"<head>
                <script type="application/ld+json">{"@type": "Article", "datePublished": "2020-01-01"}</script>
                <meta name="date" content="2010-01-01">
            </head>"#,
        );

        let finder = DateFinder::new().with_json_ld(false);
        assert!(!finder.is_enabled(Strategy::JsonLd));
        assert_eq!(finder.find(&doc), Some("2010-01-01".to_string()));
    }

    #[test]
    fn test_no_date_anywhere() {
        let doc = HtmlSnapshot::parse("<html><body><p>Hello</p></body></html>");
        assert_eq!(find_date(&doc), None);
    }

    #[test]
    fn test_strategy_names() {
        let names: Vec<_> = Strategy::ORDER.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["hash-target", "json-ld", "meta-elements", "element-content"]);
    }

    #[test]
    fn test_serialized_strategy_matches_display() {
        for strategy in Strategy::ORDER {
            let json = serde_json::to_value(strategy).unwrap();
            assert_eq!(json, strategy.name());

            let back: Strategy = serde_json::from_value(json).unwrap();
            assert_eq!(back, strategy);
        }
    }
}

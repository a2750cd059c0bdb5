//! Document snapshot over a parsed HTML string.

use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use url::Url;

use super::{DocumentSnapshot, ElementHandle, fragment_of};
use crate::error::Result;

/// An HTML page parsed with `scraper`, plus the URL it was loaded from.
pub struct HtmlSnapshot {
    html: Html,
    url: Option<Url>,
}

impl HtmlSnapshot {
    /// Parse a full HTML document with no known URL.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            url: None,
        }
    }

    /// Parse a document and attach the page URL it came from.
    pub fn parse_with_url(source: &str, url: &str) -> Result<Self> {
        Ok(Self::parse(source).with_url(Url::parse(url)?))
    }

    /// Parse raw page bytes. Invalid UTF-8 becomes U+FFFD.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// Read and parse an HTML file.
    ///
    /// Pages saved in a legacy encoding still parse; their non-ASCII text is
    /// replaced, ASCII markup and dates survive.
    pub fn from_file(path: &Path, url: Option<&str>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        match url {
            Some(url) => Self::parse_with_url(&source, url),
            None => Ok(Self::parse(&source)),
        }
    }

    /// Attach a page URL.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            trace!("ignoring invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

impl<'a> ElementHandle for ElementRef<'a> {
    fn select_first(&self, selector: &str) -> Option<Self> {
        let selector = parse_selector(selector)?;
        self.select(&selector).next()
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        match parse_selector(selector) {
            Some(selector) => self.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    fn text_content(&self) -> String {
        self.text().collect::<String>().trim().to_string()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }
}

impl DocumentSnapshot for HtmlSnapshot {
    type Element<'a> = ElementRef<'a>
    where
        Self: 'a;

    fn document_element(&self) -> Option<ElementRef<'_>> {
        Some(self.html.root_element())
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
    }

    fn url(&self) -> Option<String> {
        self.url.as_ref().map(Url::to_string)
    }

    fn fragment(&self) -> Option<String> {
        self.url.as_ref().and_then(fragment_of)
    }

    fn title(&self) -> Option<String> {
        self.select_first("title")
            .map(|title| title.text_content())
            .filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<!DOCTYPE html>
        <html>
          <head><title>  A post  </title></head>
          <body>
            <article id="post">
              <span class="date">
                2020-02-02
              </span>
            </article>
            <div id="post">second</div>
          </body>
        </html>"#;

    #[test]
    fn test_select_and_trim_text() {
        let doc = HtmlSnapshot::parse(PAGE);
        let date = doc.select_first(".date").unwrap();
        assert_eq!(date.text_content(), "2020-02-02");
        assert_eq!(doc.title(), Some("A post".to_string()));
    }

    #[test]
    fn test_invalid_selector_is_none() {
        let doc = HtmlSnapshot::parse(PAGE);
        assert!(doc.select_first("#1.2[").is_none());
        assert!(doc.select_all("::::").is_empty());
    }

    #[test]
    fn test_element_by_id_returns_first() {
        let doc = HtmlSnapshot::parse(PAGE);
        let post = doc.element_by_id("post").unwrap();
        assert_eq!(post.value().name(), "article");
    }

    #[test]
    fn test_hash_target_uses_url_fragment() {
        let doc = HtmlSnapshot::parse_with_url(PAGE, "https://example.com/page#post").unwrap();
        assert_eq!(doc.fragment(), Some("post".to_string()));
        let target = doc.hash_target().unwrap();
        assert_eq!(target.select_first(".date").unwrap().text_content(), "2020-02-02");
    }

    #[test]
    fn test_empty_fragment_has_no_target() {
        let doc = HtmlSnapshot::parse_with_url(PAGE, "https://example.com/page#").unwrap();
        assert_eq!(doc.fragment(), None);
        assert!(doc.hash_target().is_none());
    }

    #[test]
    fn test_invalid_url_is_error() {
        assert!(HtmlSnapshot::parse_with_url(PAGE, "not a url").is_err());
    }

    #[test]
    fn test_from_file_accepts_legacy_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sjis.html");

        let mut bytes = br#"<html><head><meta name="date" content="2020-01-02"></head><body><p>"#.to_vec();
        // "日" in Shift_JIS
        bytes.extend_from_slice(&[0x93, 0xFA]);
        bytes.extend_from_slice(b"</p></body></html>");
        std::fs::write(&path, &bytes).unwrap();

        let doc = HtmlSnapshot::from_file(&path, Some("https://example.jp/a")).unwrap();
        let meta = doc.select_first(r#"meta[name="date"]"#).unwrap();
        assert_eq!(meta.attribute("content"), Some("2020-01-02".to_string()));
        assert!(doc.select_first("p").unwrap().text_content().contains('\u{fffd}'));

        let from_bytes = HtmlSnapshot::parse_bytes(&bytes);
        assert_eq!(
            from_bytes.select_first("p").unwrap().text_content(),
            doc.select_first("p").unwrap().text_content()
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = HtmlSnapshot::from_file(&dir.path().join("missing.html"), None);
        assert!(matches!(result, Err(crate::error::HelioError::Io(_))));
    }

    #[test]
    fn test_missing_title() {
        let doc = HtmlSnapshot::parse("<p>no head</p>");
        assert_eq!(doc.title(), None);
        assert_eq!(doc.url(), None);
    }
}

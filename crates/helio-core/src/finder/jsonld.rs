//! JSON-LD structured data search.

use serde_json::Value;
use tracing::debug;

use crate::document::{DocumentSnapshot, ElementHandle};

/// Script blocks carrying JSON-LD.
pub const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// `@type` suffixes that mark an article-like entity.
const ARTICLE_TYPE_SUFFIXES: [&str; 3] = ["Article", "BlogPosting", "WebPage"];

const DATE_PUBLISHED: &str = "datePublished";
const UPLOAD_DATE: &str = "uploadDate";
const VIDEO_OBJECT: &str = "VideoObject";

/// Whether `@type` (a string or an array of strings) ends with an article suffix.
pub fn is_article(value: &Value) -> bool {
    let is_article_type =
        |t: &str| ARTICLE_TYPE_SUFFIXES.iter().any(|suffix| t.ends_with(suffix));

    match value.get("@type") {
        Some(Value::String(t)) => is_article_type(t.as_str()),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(is_article_type),
        _ => false,
    }
}

/// Whether the entity carries a publication date property, whatever its value.
pub fn has_date_property(value: &Value) -> bool {
    value.as_object().is_some_and(|o| o.contains_key(DATE_PUBLISHED))
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a script body as JSON.
///
/// Newlines are removed first: publishers routinely put raw line breaks inside
/// string values. With `strip_cdata`, a `<![CDATA[ ... ]]>` wrapper is unwrapped.
pub fn parse_block(content: &str, strip_cdata: bool) -> Option<Value> {
    let content = content.replace('\n', "");
    let content = if strip_cdata { unwrap_cdata(&content) } else { content.as_str() };

    match serde_json::from_str(content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("error parsing JSON-LD script: {}", e);
            None
        }
    }
}

/// Strip `<![CDATA[`/`]]>` markers along with the `//` or `/* */` comments
/// that usually hide them from script parsers.
fn unwrap_cdata(content: &str) -> &str {
    const OPEN: &str = "<![CDATA[";
    const CLOSE: &str = "]]>";

    let Some(start) = content.find(OPEN) else {
        return content;
    };
    if !matches!(content[..start].trim(), "" | "//" | "/*") {
        return content;
    }

    let inner = &content[start + OPEN.len()..];
    let inner = match inner.rfind(CLOSE) {
        Some(end) => &inner[..end],
        None => inner,
    };

    inner
        .trim()
        .trim_start_matches("*/")
        .trim_end_matches("/*")
        .trim_end_matches("//")
        .trim()
}

/// Date carried by one parsed JSON-LD value.
pub fn date_in_value(value: &Value) -> Option<String> {
    // { "@type": "Article", "datePublished": "..." }
    if is_article(value) && has_date_property(value) {
        if let Some(date) = non_empty_str(value, DATE_PUBLISHED) {
            return Some(date);
        }
    } else if value.get("@type").and_then(Value::as_str) == Some(VIDEO_OBJECT) {
        // YouTube
        if let Some(date) = non_empty_str(value, UPLOAD_DATE) {
            return Some(date);
        }
    }

    // [{ "@type": "Article", ... }] or { "@graph": [{ "@type": "Article", ... }] }
    let arrays = [Some(value), value.get("@graph")];
    arrays
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .find_map(|entities| {
            entities
                .iter()
                .find(|entity| is_article(entity) && has_date_property(entity))
                .and_then(|article| non_empty_str(article, DATE_PUBLISHED))
        })
}

/// Search every JSON-LD block of the document, in order.
pub fn find_in_json_ld<D: DocumentSnapshot>(doc: &D, strip_cdata: bool) -> Option<String> {
    let scripts = doc.select_all(JSON_LD_SELECTOR);
    if scripts.is_empty() {
        return None;
    }

    debug!("found {} JSON-LD scripts", scripts.len());
    scripts
        .iter()
        .filter_map(|script| parse_block(&script.text_content(), strip_cdata))
        .find_map(|value| {
            let date = date_in_value(&value)?;
            debug!("found {:?} in JSON-LD", date);
            Some(date)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_article_type_suffixes() {
        assert!(is_article(&json!({"@type": "NewsArticle"})));
        assert!(is_article(&json!({"@type": "BlogPosting"})));
        assert!(is_article(&json!({"@type": "WebPage"})));
        assert!(is_article(&json!({"@type": ["Thing", "ReportageNewsArticle"]})));
        assert!(!is_article(&json!({"@type": "Person"})));
        assert!(!is_article(&json!({"@type": {"nested": "Article"}})));
        assert!(!is_article(&json!(["Article"])));
    }

    #[test]
    fn test_date_property_presence_only() {
        assert!(has_date_property(&json!({"datePublished": null})));
        assert!(!has_date_property(&json!({"dateModified": "2020-01-01"})));
        assert!(!has_date_property(&json!("datePublished")));
    }

    #[test]
    fn test_article_date() {
        let value = json!({"@type": "NewsArticle", "datePublished": "2021-03-04T05:06:07Z"});
        assert_eq!(date_in_value(&value), Some("2021-03-04T05:06:07Z".to_string()));
    }

    #[test]
    fn test_video_upload_date() {
        let value = json!({"@type": "VideoObject", "uploadDate": "2018-08-08"});
        assert_eq!(date_in_value(&value), Some("2018-08-08".to_string()));
    }

    #[test]
    fn test_graph_search() {
        let value = json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Example"},
                {"@type": "WebPage", "name": "no date here"},
                {"@type": "Article", "datePublished": "2022-02-22"}
            ]
        });
        assert_eq!(date_in_value(&value), Some("2022-02-22".to_string()));
    }

    #[test]
    fn test_top_level_array() {
        let value = json!([
            {"@type": "BreadcrumbList"},
            {"@type": ["BlogPosting"], "datePublished": "2017-07-17"}
        ]);
        assert_eq!(date_in_value(&value), Some("2017-07-17".to_string()));
    }

    #[test]
    fn test_only_first_dated_article_in_array_counts() {
        let value = json!([
            {"@type": "Article", "datePublished": ""},
            {"@type": "Article", "datePublished": "2017-07-17"}
        ]);
        assert_eq!(date_in_value(&value), None);
    }

    #[test]
    fn test_non_string_date_is_ignored() {
        let value = json!({"@type": "Article", "datePublished": 20200101});
        assert_eq!(date_in_value(&value), None);
    }

    #[test]
    fn test_parse_block_strips_newlines() {
        let content = "{\"@type\": \"Article\", \"headline\": \"line one\nline two\", \"datePublished\": \"2020-01-01\"}";
        let value = parse_block(content, true).unwrap();
        assert_eq!(value["headline"], "line oneline two");
    }

    #[test]
    fn test_parse_block_unwraps_cdata() {
        let content = "//<![CDATA[\n{\"@type\": \"Article\", \"datePublished\": \"2016-06-16\"}\n//]]>";
        let value = parse_block(content, true).unwrap();
        assert_eq!(date_in_value(&value), Some("2016-06-16".to_string()));
        assert!(parse_block(content, false).is_none());

        let commented = "/* <![CDATA[ */ {\"datePublished\": \"x\"} /* ]]> */";
        assert!(parse_block(commented, true).is_some());
    }

    #[test]
    fn test_cdata_inside_string_is_untouched() {
        let content = r#"{"text": "<![CDATA[ raw ]]>"}"#;
        let value = parse_block(content, true).unwrap();
        assert_eq!(value["text"], "<![CDATA[ raw ]]>");
    }

    #[test]
    fn test_parse_block_rejects_garbage() {
        assert!(parse_block("{ not json", true).is_none());
        assert!(parse_block("", true).is_none());
    }
}

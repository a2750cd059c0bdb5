//! Selector tables and the generic lookup routine that interprets them.

use std::borrow::Cow;

use tracing::trace;

use crate::document::{DocumentSnapshot, ElementHandle};

/// Where to read a candidate date from.
///
/// With an attribute, the first element matching `selector[attribute]` is read;
/// without one, the first element matching `selector` and its trimmed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    pub selector: &'static str,
    pub attribute: Option<&'static str>,
}

impl SelectorRule {
    /// Read an attribute value.
    pub const fn attr(selector: &'static str, attribute: &'static str) -> Self {
        Self {
            selector,
            attribute: Some(attribute),
        }
    }

    /// Read the element text.
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            attribute: None,
        }
    }

    /// The selector actually queried.
    pub fn query(&self) -> Cow<'static, str> {
        match self.attribute {
            Some(attribute) => Cow::Owned(format!("{}[{}]", self.selector, attribute)),
            None => Cow::Borrowed(self.selector),
        }
    }
}

/// Rules tried inside the element addressed by the URL fragment.
pub const HASH_TARGET_RULES: &[SelectorRule] = &[
    SelectorRule::attr("relative-time", "datetime"),
    SelectorRule::attr("time", "datetime"),
    SelectorRule::text("time"),
    SelectorRule::text(".date"),
];

/// Meta tags and machine-readable time attributes.
pub const META_RULES: &[SelectorRule] = &[
    SelectorRule::attr(r#"meta[property="article:published_time"]"#, "content"),
    SelectorRule::attr(r#"meta[property="og:published_time"]"#, "content"),
    SelectorRule::attr(r#"meta[name="pubdate"]"#, "content"),
    SelectorRule::attr(r#"meta[name="creation_date"]"#, "content"),
    SelectorRule::attr(r#"meta[name="date"]"#, "content"),
    SelectorRule::attr("relative-time", "datetime"),
    SelectorRule::attr("time", "datetime"),
    // WebKit Bugzilla
    SelectorRule::attr(".bz_comment_time", "data-ts"),
];

/// Visible text of date-like elements.
pub const CONTENT_RULES: &[SelectorRule] = &[
    SelectorRule::text("time"),
    SelectorRule::text(".date"),
    SelectorRule::text(".pubdate"),
    SelectorRule::text(".post_date"),
    // Google Search Central Blog
    SelectorRule::text("p.gargardate"),
    // Chrome Developers, web.dev
    SelectorRule::text(".wd-pubdates"),
    // Chrome Developers
    SelectorRule::text("devsite-content-footer p:last-child"),
    // SpeakerDeck
    SelectorRule::text(".deck-date"),
];

/// Read one rule against a scope. Empty values count as absent.
pub fn value_from_element<E: ElementHandle>(scope: &E, rule: &SelectorRule) -> Option<String> {
    let element = scope.select_first(&rule.query())?;
    let value = match rule.attribute {
        Some(attribute) => element.attribute(attribute)?.trim().to_string(),
        None => element.text_content(),
    };

    trace!(selector = rule.selector, attribute = ?rule.attribute, "found {:?}", value);

    if value.is_empty() { None } else { Some(value) }
}

/// First non-empty value produced by the rules, in order.
pub fn find_value_from_rules<E: ElementHandle>(scope: &E, rules: &[SelectorRule]) -> Option<String> {
    rules.iter().find_map(|rule| value_from_element(scope, rule))
}

/// Search the subtree of the element the URL fragment points at.
pub fn find_in_hash_target<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    let target = doc.hash_target()?;
    find_value_from_rules(&target, HASH_TARGET_RULES)
}

/// Search meta tags and time attributes across the document.
pub fn find_in_meta_elements<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    let root = doc.document_element()?;
    find_value_from_rules(&root, META_RULES)
}

/// Search element text across the document.
pub fn find_in_element_content<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    let root = doc.document_element()?;
    find_value_from_rules(&root, CONTENT_RULES)
}

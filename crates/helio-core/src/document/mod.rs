//! Read-only document abstraction the finder runs against.
//!
//! A front end supplies the page: a parsed HTML string on the command line,
//! the live DOM in the browser. Lookups never fail loudly; an invalid
//! selector or a missing element is just `None`.

#[cfg(feature = "html")]
pub mod html;

/// An element inside a document snapshot.
pub trait ElementHandle: Sized {
    /// First descendant matching a CSS selector.
    fn select_first(&self, selector: &str) -> Option<Self>;

    /// All descendants matching a CSS selector, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// Text content of the element and its descendants, trimmed.
    fn text_content(&self) -> String;

    /// Raw attribute value.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// A loaded page.
pub trait DocumentSnapshot {
    /// Element handle type, possibly borrowing from the snapshot.
    type Element<'a>: ElementHandle
    where
        Self: 'a;

    /// The root element (`<html>`).
    fn document_element(&self) -> Option<Self::Element<'_>>;

    /// First element in document order with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element<'_>>;

    /// Page URL, if known.
    fn url(&self) -> Option<String>;

    /// URL fragment without the leading `#`.
    fn fragment(&self) -> Option<String>;

    /// Document title, if the page has a non-empty one.
    fn title(&self) -> Option<String>;

    /// First element in the whole document matching a selector.
    fn select_first(&self, selector: &str) -> Option<Self::Element<'_>> {
        self.document_element()?.select_first(selector)
    }

    /// All elements in the whole document matching a selector.
    fn select_all(&self, selector: &str) -> Vec<Self::Element<'_>> {
        self.document_element()
            .map(|root| root.select_all(selector))
            .unwrap_or_default()
    }

    /// Element addressed by the URL fragment.
    fn hash_target(&self) -> Option<Self::Element<'_>> {
        let id = self.fragment().filter(|f| !f.is_empty())?;
        self.element_by_id(&id)
    }
}

/// Extract the non-empty fragment of a URL string, without the `#`.
pub fn fragment_of(url: &url::Url) -> Option<String> {
    url.fragment()
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}

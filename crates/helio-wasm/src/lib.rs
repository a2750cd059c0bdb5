//! WASM bindings for publication date extraction.
//!
//! Runs the finder against the live DOM of the page the module is loaded into.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use helio_core::{DateFinder, DocumentSnapshot, ElementHandle, HelioConfig, ParsedDate};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// A DOM element.
pub struct DomElement(web_sys::Element);

impl ElementHandle for DomElement {
    fn select_first(&self, selector: &str) -> Option<Self> {
        self.0.query_selector(selector).ok().flatten().map(DomElement)
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(DomElement)
            .collect()
    }

    fn text_content(&self) -> String {
        self.0
            .text_content()
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// The live document of the current window.
pub struct DomSnapshot {
    document: web_sys::Document,
}

impl DomSnapshot {
    /// Snapshot of `window.document`.
    pub fn current() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| to_js_error("no document available"))?;
        Ok(Self { document })
    }

    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl DocumentSnapshot for DomSnapshot {
    type Element<'a> = DomElement
    where
        Self: 'a;

    fn document_element(&self) -> Option<DomElement> {
        self.document.document_element().map(DomElement)
    }

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement)
    }

    fn url(&self) -> Option<String> {
        self.document.location()?.href().ok()
    }

    fn fragment(&self) -> Option<String> {
        let hash = self.document.location()?.hash().ok()?;
        let id = hash.strip_prefix('#').unwrap_or(&hash);
        (!id.is_empty()).then(|| id.to_string())
    }

    fn title(&self) -> Option<String> {
        let title = self.document.title();
        (!title.is_empty()).then_some(title)
    }
}

/// Find the raw publication date string of the current page.
#[wasm_bindgen]
pub fn find_date() -> Result<Option<String>, JsValue> {
    let doc = DomSnapshot::current()?;
    Ok(helio_core::find_date(&doc))
}

/// Inspect the current page: title, raw date string, parsed date, label and badge.
#[wasm_bindgen]
pub fn inspect_page() -> Result<JsValue, JsValue> {
    let doc = DomSnapshot::current()?;
    let report = helio_core::inspect(&doc, &HelioConfig::default());

    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}

/// Parse a raw date string into `{year, month, day}`, or `null`.
#[wasm_bindgen]
pub fn parse_date(raw: &str) -> Result<JsValue, JsValue> {
    match helio_core::parse_date(raw) {
        Some(date) => serde_wasm_bindgen::to_value(&date).map_err(to_js_error),
        None => Ok(JsValue::NULL),
    }
}

/// Badge text for a month/day pair, e.g. `"3/19"` or `"1212"`.
#[wasm_bindgen]
pub fn format_badge_text(month: &str, day: &str) -> String {
    helio_core::format_badge_text(month, day)
}

/// Date inspector class with its own configuration.
#[wasm_bindgen]
pub struct DateInspector {
    config: HelioConfig,
}

#[wasm_bindgen]
impl DateInspector {
    /// Create an inspector with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: HelioConfig::default(),
        }
    }

    /// Create an inspector from a configuration object.
    ///
    /// Missing fields take their default values.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<DateInspector, JsValue> {
        let config: HelioConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        Ok(Self { config })
    }

    /// Configuration as a JSON string.
    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config).map_err(to_js_error)
    }

    /// Raw date string of the current page.
    #[wasm_bindgen]
    pub fn find(&self) -> Result<Option<String>, JsValue> {
        let doc = DomSnapshot::current()?;
        Ok(DateFinder::from_config(self.config.finder.clone()).find(&doc))
    }

    /// Report for the current page.
    #[wasm_bindgen]
    pub fn inspect(&self) -> Result<JsValue, JsValue> {
        let doc = DomSnapshot::current()?;
        let report = helio_core::inspect(&doc, &self.config);

        serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
    }

    /// Badge text for the current page, or an empty string.
    #[wasm_bindgen]
    pub fn badge(&self) -> Result<String, JsValue> {
        let doc = DomSnapshot::current()?;
        let report = helio_core::inspect(&doc, &self.config);
        Ok(report.badge.unwrap_or_default())
    }
}

impl Default for DateInspector {
    fn default() -> Self {
        Self::new()
    }
}

/// Label for a parsed date, exposed for callers that hold `{year, month, day}`.
#[wasm_bindgen]
pub fn date_label(date: JsValue) -> Result<String, JsValue> {
    let date: ParsedDate = serde_wasm_bindgen::from_value(date).map_err(to_js_error)?;
    Ok(date.label())
}

//! Thin typed wrappers over the `web-sys` calls the site needs.

use page::{ScrollMetrics, SectionRect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or_else(|| SiteError::missing("window"))
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or_else(|| SiteError::missing("document"))
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub fn require_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, SiteError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| SiteError::missing(format!("#{id}")))
}

pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Inline style write; elements that are not `HtmlElement`s are skipped.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if let Err(err) = html.style().set_property(property, value) {
            tracing::debug!(property, ?err, "style write failed");
        }
    }
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let scroll_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        scroll_height,
        inner_height: inner_height(window),
    }
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn section_rect(el: &Element) -> SectionRect {
    let rect = el.get_bounding_client_rect();
    SectionRect {
        top: rect.top(),
        bottom: rect.bottom(),
    }
}

pub fn smooth_scroll_to(document: &Document, id: &str) {
    match by_id(document, id) {
        Some(el) => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
        None => tracing::debug!(id, "scroll target missing"),
    }
}

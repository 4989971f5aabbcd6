//! DOM element bindings.
//!
//! Everything except `<html>` and `<body>` is optional: page variants without
//! a given section simply leave the field empty and the handlers no-op.
//! To add new UI elements, add a field here and bind it in `Elements::bind()`.

use folio_view::scroll::SectionBounds;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    query_all_within(&document().into(), selector)
}

/// Query all matching elements within a parent node.
pub fn query_all_within(parent: &web_sys::Node, selector: &str) -> Vec<Element> {
    let list = if let Some(el) = parent.dyn_ref::<Element>() {
        el.query_selector_all(selector)
    } else if let Some(doc) = parent.dyn_ref::<Document>() {
        doc.query_selector_all(selector)
    } else {
        return Vec::new();
    };
    let Ok(nl) = list else {
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(prop, value);
    }
}

pub fn create_element(tag: &str) -> Option<Element> {
    document().create_element(tag).ok()
}

/// Timer callbacks may outlive their element.
pub fn is_attached(el: &Element) -> bool {
    el.is_connected()
}

pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or_default()
}

pub fn viewport_width() -> f64 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default()
}

pub fn smooth_scroll_to(top: f64) {
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&opts);
}

// ── Elements struct ──

/// DOM element references used by the portfolio page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub root: Element,
    pub body: HtmlElement,

    // Navigation
    pub navbar: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_menu: Option<Element>,
    pub nav_links: Vec<Element>,
    pub sections: Vec<HtmlElement>,
    pub back_to_top: Option<Element>,
    pub hero: Option<Element>,

    // Theme
    pub theme_toggle: Option<Element>,
    pub theme_icon: Option<Element>,

    // Inline editing
    pub editable: Vec<HtmlElement>,
    pub edit_btn: Option<Element>,
    pub save_btn: Option<Element>,

    // Profile image
    pub profile_input: Option<HtmlInputElement>,
    pub profile_img: Option<HtmlImageElement>,
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        let doc = document();
        let root = doc
            .document_element()
            .ok_or_else(|| JsValue::from_str("missing <html>"))?;
        let body = doc.body().ok_or_else(|| JsValue::from_str("missing <body>"))?;

        Ok(Elements {
            root,
            body,

            navbar: by_id("navbar"),
            hamburger: by_id("hamburger"),
            nav_menu: by_id("nav-menu"),
            nav_links: query_all(".nav-link"),
            sections: query_all("section[id]")
                .into_iter()
                .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
                .collect(),
            back_to_top: by_id("back-to-top"),
            hero: query(".hero"),

            theme_toggle: by_id("theme-toggle"),
            theme_icon: query("#theme-toggle i"),

            editable: query_all("[data-field]")
                .into_iter()
                .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
                .collect(),
            edit_btn: by_id("edit-btn"),
            save_btn: by_id("save-btn"),

            profile_input: by_id_typed::<HtmlInputElement>("profile-upload"),
            profile_img: by_id_typed::<HtmlImageElement>("profile-image"),
        })
    }

    /// Current layout of every `section[id]`, in document order.
    pub fn measure_sections(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|s| {
                SectionBounds::new(s.id(), s.offset_top() as f64, s.offset_height() as f64)
            })
            .collect()
    }
}

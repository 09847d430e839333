//! DOM stage access
//!
//! Every lookup is by stable element id (or selector for the avatar bits).
//! A missing target is a silent no-op so the animation sequence never
//! aborts; the worst case is a partially rendered page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

pub struct Stage {
    document: Option<Document>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }

    fn get(&self, id: &str) -> Option<Element> {
        self.document.as_ref().and_then(|d| d.get_element_by_id(id))
    }

    fn html(&self, id: &str) -> Option<HtmlElement> {
        self.get(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// First element matching a selector, as an HtmlElement
    pub fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .as_ref()?
            .query_selector(selector)
            .ok()??
            .dyn_into::<HtmlElement>()
            .ok()
    }

    pub fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.get(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.get(id) {
            let _ = el.class_list().add_1(class);
        }
    }

    pub fn add_class_sel(&self, selector: &str, class: &str) {
        if let Some(el) = self.query(selector) {
            let _ = el.class_list().add_1(class);
        }
    }

    pub fn set_style(&self, id: &str, prop: &str, value: &str) {
        if let Some(el) = self.html(id) {
            let _ = el.style().set_property(prop, value);
        }
    }

    pub fn set_style_sel(&self, selector: &str, prop: &str, value: &str) {
        if let Some(el) = self.query(selector) {
            let _ = el.style().set_property(prop, value);
        }
    }

    /// Progress-bar width as a floored percentage
    pub fn set_width_pct(&self, id: &str, pct: f32) {
        self.set_style(id, "width", &format!("{}%", pct.floor() as u32));
    }

    pub fn clear_input(&self, id: &str) {
        if let Some(el) = self
            .get(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            el.set_value("");
        }
    }

    pub fn focus(&self, id: &str) {
        if let Some(el) = self.html(id) {
            let _ = el.focus();
        }
    }

    /// Centre of an element's bounding box in client coordinates
    pub fn center_of(&self, id: &str) -> Option<(f32, f32)> {
        let rect = self.get(id)?.get_bounding_client_rect();
        Some((
            (rect.left() + rect.width() / 2.0) as f32,
            (rect.top() + rect.height() / 2.0) as f32,
        ))
    }
}

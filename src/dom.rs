//! The DOM port every component writes through.
//!
//! Components never touch `web_sys` directly; they receive a [`Dom`] and the
//! node handles they were built with. [`WebDom`] is the browser
//! implementation, tests run against the in-memory `fake::FakeDom`.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::selectors;
use crate::error::MountError;

#[cfg(test)]
pub mod fake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Smooth,
    Instant,
}

pub trait Dom {
    type Node: Clone + PartialEq;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn is_checked(&self, node: &Self::Node) -> bool;
    fn set_checked(&self, node: &Self::Node, checked: bool);
    fn is_disabled(&self, node: &Self::Node) -> bool;
    fn set_disabled(&self, node: &Self::Node, disabled: bool);
    fn focus(&self, node: &Self::Node);
    fn reset_form(&self, form: &Self::Node);

    /// True when any part of the node overlaps the viewport.
    fn in_viewport(&self, node: &Self::Node) -> bool;
    /// Distance from the top of the document to the top of the node.
    fn page_top(&self, node: &Self::Node) -> f64;
    fn header_height(&self) -> Option<f64>;
    fn scroll_to(&self, top: f64, mode: ScrollMode);
    fn set_scroll_locked(&self, locked: bool);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn query(&self, root: Option<&Element>, selector: &str) -> Option<Element> {
        let found = match root {
            Some(root) => root.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.ok().flatten()
    }

    pub fn query_all(&self, root: Option<&Element>, selector: &str) -> Vec<Element> {
        let found = match root {
            Some(root) => root.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        match found {
            Ok(list) => elements(&list),
            Err(e) => {
                log::warn!("Invalid selector {}: {:?}", selector, e);
                Vec::new()
            }
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn set_checked(&self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn is_disabled(&self, node: &Element) -> bool {
        node.has_attribute("disabled")
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if disabled {
            let _ = node.set_attribute("disabled", "");
        } else {
            let _ = node.remove_attribute("disabled");
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn in_viewport(&self, node: &Element) -> bool {
        let rect = node.get_bounding_client_rect();
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        rect.top() < height && rect.bottom() > 0.0
    }

    fn page_top(&self, node: &Element) -> f64 {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        node.get_bounding_client_rect().top() + scroll_y
    }

    fn header_height(&self) -> Option<f64> {
        self.query(None, selectors::HEADER)
            .and_then(|header| header.dyn_into::<HtmlElement>().ok())
            .map(|header| header.offset_height() as f64)
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Instant => ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = self.document.body() {
            let style = body.style();
            if locked {
                let _ = style.set_property("overflow", "hidden");
            } else {
                let _ = style.remove_property("overflow");
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

#![forbid(unsafe_code)]

//! `web-sys` implementations of the folio node traits.

use folio_core::{FolioError, Result, UiDocument, UiNode};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, ScrollBehavior, ScrollToOptions,
};

use crate::parse_px;

pub(crate) fn host_error(context: &str, err: &JsValue) -> FolioError {
    FolioError::Host(format!("{context}: {err:?}"))
}

fn elements(list: &NodeList) -> Vec<DomNode> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomNode)
        .collect()
}

/// Live DOM element handle.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode(pub Element);

impl DomNode {
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }

    fn computed_px(&self, property: &str) -> f64 {
        web_sys::window()
            .and_then(|window| window.get_computed_style(&self.0).ok().flatten())
            .and_then(|style| style.get_property_value(property).ok())
            .map_or(0.0, |value| parse_px(&value))
    }
}

impl UiNode for DomNode {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) {
        if let Err(err) = self.0.class_list().toggle_with_force(class, on) {
            tracing::warn!(target: "folio.web", class, ?err, "class toggle failed");
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.html()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            tracing::warn!(target: "folio.web", property, ?err, "style write failed");
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other.0.as_ref();
        self.0.contains(Some(other))
    }

    fn children(&self) -> Vec<Self> {
        let list = self.0.children();
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(DomNode)
            .collect()
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        self.0
            .append_child(&child.0)
            .map(drop)
            .map_err(|err| host_error("appendChild", &err))
    }

    fn clear_children(&self) {
        self.0.set_inner_html("");
    }

    fn clone_deep(&self) -> Result<Self> {
        self.0
            .clone_node_with_deep(true)
            .map_err(|err| host_error("cloneNode", &err))?
            .dyn_into::<Element>()
            .map(DomNode)
            .map_err(|node| host_error("cloneNode returned a non-element", &node))
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        self.0
            .dyn_ref::<HtmlSelectElement>()
            .map(HtmlSelectElement::value)
    }

    fn offset_top(&self) -> f64 {
        self.html().map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn offset_width(&self) -> f64 {
        self.html().map_or(0.0, |html| f64::from(html.offset_width()))
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.0.scroll_width())
    }

    fn horizontal_margins(&self) -> f64 {
        self.computed_px("margin-left") + self.computed_px("margin-right")
    }

    fn scroll_left(&self) -> f64 {
        f64::from(self.0.scroll_left())
    }

    fn set_scroll_left(&self, left: f64) {
        // Options form keeps sub-pixel offsets and skips CSS smooth scrolling.
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(ScrollBehavior::Instant);
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                tracing::warn!(target: "folio.web", selector, ?err, "invalid selector");
                Vec::new()
            }
        }
    }
}

/// The page's live document.
#[derive(Debug, Clone)]
pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn inner(&self) -> &Document {
        &self.document
    }
}

impl UiDocument for DomDocument {
    type Node = DomNode;

    fn query(&self, selector: &str) -> Option<DomNode> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(DomNode),
            Err(err) => {
                tracing::warn!(target: "folio.web", selector, ?err, "invalid selector");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<DomNode> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                tracing::warn!(target: "folio.web", selector, ?err, "invalid selector");
                Vec::new()
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<DomNode> {
        self.document.get_element_by_id(id).map(DomNode)
    }

    fn create_element(&self, tag: &str) -> Result<DomNode> {
        self.document
            .create_element(tag)
            .map(DomNode)
            .map_err(|err| host_error("createElement", &err))
    }
}

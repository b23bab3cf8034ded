#![forbid(unsafe_code)]

//! In-memory document for deterministic native runs.
//!
//! [`HeadlessNode`] implements [`UiNode`] with DOM-like handle semantics
//! (shared, interior-mutable, identity equality) so every component can be
//! driven and inspected without a browser. Layout values are not computed;
//! callers assign them with the `with_*`/`set_*` helpers. Selector queries are
//! matched by `scraper`, so they follow browser CSS semantics.

mod markup;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::error::{FolioError, Result};
use crate::node::{UiDocument, UiNode};

/// Layout readings reported by a headless node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadlessLayout {
    pub offset_top: f64,
    pub offset_width: f64,
    pub scroll_width: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: Option<String>,
    layout: HeadlessLayout,
    scroll_left: f64,
    read_only: bool,
    children: Vec<HeadlessNode>,
    parent: Weak<RefCell<NodeData>>,
}

/// Shared handle to a headless element.
#[derive(Clone)]
pub struct HeadlessNode(Rc<RefCell<NodeData>>);

impl PartialEq for HeadlessNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl core::fmt::Debug for HeadlessNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("HeadlessNode")
            .field("tag", &data.tag)
            .field("id", &data.attrs.get("id"))
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl HeadlessNode {
    /// Detached element with tag `tag`.
    #[must_use]
    pub fn element(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        })))
    }

    /// Builder: add a class flag.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.set_class(class, true);
        self
    }

    /// Builder: set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.set_attribute("id", id);
        self
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set a form control value.
    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: assign layout readings.
    #[must_use]
    pub fn with_layout(self, layout: HeadlessLayout) -> Self {
        self.set_layout(layout);
        self
    }

    /// Builder: append children in order.
    #[must_use]
    pub fn with_children(self, children: impl IntoIterator<Item = HeadlessNode>) -> Self {
        for child in children {
            self.attach(&child);
        }
        self
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_string());
    }

    pub fn set_layout(&self, layout: HeadlessLayout) {
        self.0.borrow_mut().layout = layout;
    }

    /// Make `append_child` on this node fail with a host error, the way a
    /// DOM call can throw.
    pub fn set_read_only(&self, read_only: bool) {
        self.0.borrow_mut().read_only = read_only;
    }

    #[must_use]
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// Class flags in insertion order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    #[must_use]
    pub fn parent(&self) -> Option<HeadlessNode> {
        self.0.borrow().parent.upgrade().map(HeadlessNode)
    }

    fn attach(&self, child: &HeadlessNode) {
        if let Some(old_parent) = child.parent() {
            old_parent.0.borrow_mut().children.retain(|c| c != child);
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    fn descendants(&self, out: &mut Vec<HeadlessNode>) {
        for child in self.0.borrow().children.iter() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn deep_copy(&self) -> HeadlessNode {
        let data = self.0.borrow();
        let copy = HeadlessNode(Rc::new(RefCell::new(NodeData {
            tag: data.tag.clone(),
            classes: data.classes.clone(),
            attrs: data.attrs.clone(),
            style: data.style.clone(),
            text: data.text.clone(),
            value: data.value.clone(),
            layout: data.layout,
            scroll_left: 0.0,
            read_only: false,
            children: Vec::new(),
            parent: Weak::new(),
        })));
        for child in data.children.iter() {
            copy.attach(&child.deep_copy());
        }
        copy
    }
}

impl UiNode for HeadlessNode {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_class(&self, class: &str, on: bool) {
        let mut data = self.0.borrow_mut();
        let present = data.classes.iter().any(|c| c == class);
        if on && !present {
            data.classes.push(class.to_string());
        } else if !on && present {
            data.classes.retain(|c| c != class);
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if &node == self {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        if self.0.borrow().read_only {
            return Err(FolioError::Host("node is read-only".into()));
        }
        if child.contains(self) {
            return Err(FolioError::Host(
                "cannot append a node to its own subtree".into(),
            ));
        }
        self.attach(child);
        Ok(())
    }

    fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    fn clone_deep(&self) -> Result<Self> {
        Ok(self.deep_copy())
    }

    fn set_text(&self, text: &str) {
        self.clear_children();
        self.0.borrow_mut().text = text.to_string();
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn offset_top(&self) -> f64 {
        self.0.borrow().layout.offset_top
    }

    fn offset_width(&self) -> f64 {
        self.0.borrow().layout.offset_width
    }

    fn scroll_width(&self) -> f64 {
        self.0.borrow().layout.scroll_width
    }

    fn horizontal_margins(&self) -> f64 {
        let layout = self.0.borrow().layout;
        layout.margin_left + layout.margin_right
    }

    fn scroll_left(&self) -> f64 {
        self.0.borrow().scroll_left
    }

    fn set_scroll_left(&self, left: f64) {
        self.0.borrow_mut().scroll_left = left;
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let mut top = self.clone();
        while let Some(parent) = top.parent() {
            top = parent;
        }
        select(&top, selector)
            .into_iter()
            .filter(|node| node != self && self.contains(node))
            .collect()
    }
}

fn select(top: &HeadlessNode, selector: &str) -> Vec<HeadlessNode> {
    match markup::parse_selector(selector) {
        Some(parsed) => markup::select(top, &parsed),
        None => {
            tracing::warn!(target: "folio.headless", selector, "invalid selector");
            Vec::new()
        }
    }
}

/// Headless document rooted at an `html` element.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    root: HeadlessNode,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: HeadlessNode::element("html"),
        }
    }

    /// Document with `body_children` under `html > body`.
    #[must_use]
    pub fn with_body(body_children: impl IntoIterator<Item = HeadlessNode>) -> Self {
        let doc = Self::new();
        let body = HeadlessNode::element("body").with_children(body_children);
        doc.root.attach(&body);
        doc
    }

    /// Document parsed from HTML markup. The parser supplies any missing
    /// `html`, `head` or `body` element.
    #[must_use]
    pub fn from_html(markup: &str) -> Self {
        Self {
            root: markup::tree_from_html(markup),
        }
    }

    /// The `html` element.
    #[must_use]
    pub fn root(&self) -> &HeadlessNode {
        &self.root
    }
}

impl UiDocument for HeadlessDocument {
    type Node = HeadlessNode;

    fn query(&self, selector: &str) -> Option<HeadlessNode> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<HeadlessNode> {
        select(&self.root, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<HeadlessNode> {
        let mut all = Vec::new();
        self.root.descendants(&mut all);
        all.into_iter()
            .find(|node| node.attribute("id").as_deref() == Some(id))
    }

    fn create_element(&self, tag: &str) -> Result<HeadlessNode> {
        Ok(HeadlessNode::element(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HeadlessDocument {
        HeadlessDocument::with_body([
            HeadlessNode::element("nav").with_children([HeadlessNode::element("ul")
                .with_class("nav-links")
                .with_children([
                    HeadlessNode::element("a").with_attr("href", "#about"),
                    HeadlessNode::element("a").with_attr("href", "#work"),
                ])]),
            HeadlessNode::element("section").with_id("about"),
        ])
    }

    #[test]
    fn query_returns_document_order() {
        let doc = sample();
        let links = doc.query_all(".nav-links a");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].attribute("href").as_deref(), Some("#about"));
        assert_eq!(links[1].attribute("href").as_deref(), Some("#work"));
    }

    #[test]
    fn element_by_id_and_contains() {
        let doc = sample();
        let about = doc.element_by_id("about").expect("about section");
        assert_eq!(about.tag(), "section");
        let nav = doc.query("nav").expect("nav");
        let link = doc.query(".nav-links a").expect("link");
        assert!(nav.contains(&link));
        assert!(nav.contains(&nav));
        assert!(!link.contains(&nav));
    }

    #[test]
    fn deep_clone_is_detached_and_independent() {
        let doc = sample();
        let list = doc.query(".nav-links").expect("list");
        let copy = list.clone_deep().expect("clone");
        assert_ne!(copy, list);
        assert!(copy.parent().is_none());
        assert_eq!(copy.children().len(), 2);
        copy.add_class("copy");
        assert!(!list.has_class("copy"));
    }

    #[test]
    fn append_into_own_subtree_is_rejected() {
        let doc = sample();
        let nav = doc.query("nav").expect("nav");
        let list = doc.query(".nav-links").expect("list");
        assert!(list.append_child(&nav).is_err());
    }

    #[test]
    fn set_text_replaces_children() {
        let doc = sample();
        let list = doc.query(".nav-links").expect("list");
        list.set_text("gone");
        assert!(list.children().is_empty());
        assert_eq!(list.text(), "gone");
        assert!(doc.query_all(".nav-links a").is_empty());
    }

    #[test]
    fn selectors_follow_css_semantics() {
        let doc = HeadlessDocument::with_body([
            HeadlessNode::element("a").with_attr("title", "About me"),
            HeadlessNode::element("div").with_attr("data-reveal", "a,b"),
            HeadlessNode::element("ul").with_children([HeadlessNode::element("li")]),
        ]);
        assert_eq!(doc.query_all(r#"a[title="About me"]"#).len(), 1);
        assert_eq!(doc.query_all(r#"[data-reveal="a,b"]"#).len(), 1);
        assert_eq!(doc.query_all("ul > li").len(), 1);
        assert!(doc.query_all("body > li").is_empty());
    }

    #[test]
    fn node_query_matches_ancestors_but_returns_descendants_only() {
        let doc = sample();
        let list = doc.query(".nav-links").expect("list");
        // `nav` sits above the list, yet the combinator may use it.
        assert_eq!(list.query_all("nav a").len(), 2);
        assert!(list.query_all(".nav-links").is_empty());
    }

    #[test]
    fn selector_list_yields_each_element_once() {
        let doc = HeadlessDocument::with_body([HeadlessNode::element("div")
            .with_class("skill")
            .with_children([HeadlessNode::element("span").with_class("software-item")])]);
        let hits = doc.query_all(".skill .software-item, .software-item");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = sample();
        assert!(doc.query_all("a[href").is_empty());
    }

    #[test]
    fn markup_fixture_keeps_classes_attributes_and_values() {
        let doc = HeadlessDocument::from_html(
            r#"<form id="contact-form">
                 <input id="name" value="Ada">
                 <textarea id="message"> Engines </textarea>
               </form>
               <p class="lead intro" title="A &amp; B">Hello <b>there</b></p>"#,
        );
        assert_eq!(doc.root().tag(), "html");
        let name = doc.element_by_id("name").expect("name");
        assert_eq!(name.value().as_deref(), Some("Ada"));
        let message = doc.element_by_id("message").expect("message");
        assert_eq!(message.value().as_deref(), Some("Engines"));
        let lead = doc.query("p.intro").expect("paragraph");
        assert_eq!(lead.classes(), vec!["lead".to_string(), "intro".to_string()]);
        assert_eq!(lead.attribute("title").as_deref(), Some("A & B"));
        assert_eq!(lead.text(), "Hello");
        assert_eq!(lead.children().len(), 1);
    }

    #[test]
    fn escaped_values_survive_matching() {
        let doc = HeadlessDocument::with_body([
            HeadlessNode::element("a").with_attr("title", r#"say "hi" & <go>"#)
        ]);
        assert_eq!(doc.query_all(r#"a[title='say "hi" & <go>']"#).len(), 1);
    }

    #[test]
    fn read_only_node_rejects_appends() {
        let doc = sample();
        let list = doc.query(".nav-links").expect("list");
        list.set_read_only(true);
        let err = list.append_child(&HeadlessNode::element("a")).unwrap_err();
        assert!(matches!(err, FolioError::Host(_)));
        assert_eq!(list.children().len(), 2);
    }
}

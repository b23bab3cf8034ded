#![forbid(unsafe_code)]

//! HTML bridge between headless trees and `scraper`.
//!
//! Selector queries render the tree to HTML with every element tagged by its
//! preorder index, let `scraper` parse and match it, and map the hits back to
//! nodes through that index. Fixtures can also be built the other way, from
//! markup through `scraper`'s tree.

use scraper::{ElementRef, Html, Selector};

use super::HeadlessNode;
use crate::node::UiNode;

const INDEX_ATTR: &str = "data-headless-index";

/// Parse a selector list the way a browser would; `None` when invalid.
pub(super) fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Every element under `top` (inclusive) matching `selector`, in document
/// order.
pub(super) fn select(top: &HeadlessNode, selector: &Selector) -> Vec<HeadlessNode> {
    let mut nodes = vec![top.clone()];
    top.descendants(&mut nodes);

    let mut html = String::from("<!DOCTYPE html>");
    let mut next_index = 0;
    render(top, &mut next_index, &mut html);

    let document = Html::parse_document(&html);
    document
        .select(selector)
        .filter_map(|element| element.value().attr(INDEX_ATTR))
        .filter_map(|index| index.parse::<usize>().ok())
        .filter_map(|index| nodes.get(index).cloned())
        .collect()
}

/// Preorder rendering; indices follow `HeadlessNode::descendants` order.
fn render(node: &HeadlessNode, next_index: &mut usize, out: &mut String) {
    let data = node.0.borrow();
    out.push('<');
    out.push_str(&data.tag);
    push_attr(out, INDEX_ATTR, &next_index.to_string());
    *next_index += 1;
    if !data.classes.is_empty() {
        push_attr(out, "class", &data.classes.join(" "));
    }
    for (name, value) in data.attrs.iter().filter(|(name, _)| name.as_str() != "class") {
        push_attr(out, name, value);
    }
    out.push('>');
    push_escaped(out, &data.text, false);
    for child in &data.children {
        render(child, next_index, out);
    }
    out.push_str("</");
    out.push_str(&data.tag);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    push_escaped(out, value, true);
    out.push('"');
}

fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Build a headless tree from the `html` element of parsed markup.
pub(super) fn tree_from_html(markup: &str) -> HeadlessNode {
    let parsed = Html::parse_document(markup);
    convert(parsed.root_element())
}

fn convert(element: ElementRef<'_>) -> HeadlessNode {
    let value = element.value();
    let node = HeadlessNode::element(value.name());
    for class in value.attr("class").unwrap_or_default().split_whitespace() {
        node.add_class(class);
    }
    for (name, attr) in value.attrs().filter(|(name, _)| *name != "class") {
        node.set_attribute(name, attr);
    }

    let text: String = element
        .children()
        .filter_map(|child| child.value().as_text().map(|text| String::from(&**text)))
        .collect();
    let text = text.trim();
    if value.name() == "textarea" {
        node.set_value(text);
    } else {
        if let Some(initial) = value.attr("value") {
            node.set_value(initial);
        }
        node.0.borrow_mut().text = text.to_string();
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        node.attach(&convert(child));
    }
    node
}

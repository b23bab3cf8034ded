#![forbid(unsafe_code)]

//! Abstraction over UI-node handles.
//!
//! Components never touch a concrete UI toolkit. They operate on any handle
//! that offers the capability set {queryable, classable, styleable} plus the
//! handful of layout reads the accordion and carousel need.
//!
//! Handles follow DOM semantics: they are cheap to clone, clones refer to the
//! same node, and mutation goes through `&self`. Equality is node identity.

use crate::error::Result;

/// A handle to one element in the host's UI tree.
pub trait UiNode: Clone + PartialEq + core::fmt::Debug {
    /// Whether the class flag `class` is set.
    fn has_class(&self, class: &str) -> bool;

    /// Set or clear the class flag `class`.
    fn set_class(&self, class: &str, on: bool);

    /// Set the class flag `class`.
    fn add_class(&self, class: &str) {
        self.set_class(class, true);
    }

    /// Clear the class flag `class`.
    fn remove_class(&self, class: &str) {
        self.set_class(class, false);
    }

    /// Flip the class flag `class`, returning the new state.
    fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }

    /// Inline style property value, if set. Custom properties (`--x`) included.
    fn style(&self, property: &str) -> Option<String>;

    /// Set an inline style property.
    fn set_style(&self, property: &str, value: &str);

    /// Attribute value, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Element children in order.
    fn children(&self) -> Vec<Self>;

    /// Append `child` as the last child.
    fn append_child(&self, child: &Self) -> Result<()>;

    /// Remove every child.
    fn clear_children(&self);

    /// Detached deep copy of this node and its subtree.
    fn clone_deep(&self) -> Result<Self>;

    /// Replace text content.
    fn set_text(&self, text: &str);

    /// Current value of a form control, if this node is one.
    fn value(&self) -> Option<String>;

    /// Distance from the top of the offset parent, in px.
    fn offset_top(&self) -> f64;

    /// Rendered width, in px.
    fn offset_width(&self) -> f64;

    /// Natural (content) width, in px.
    fn scroll_width(&self) -> f64;

    /// Computed `margin-left + margin-right`, in px.
    fn horizontal_margins(&self) -> f64;

    /// Horizontal scroll offset, in px.
    fn scroll_left(&self) -> f64;

    /// Set the horizontal scroll offset, in px.
    fn set_scroll_left(&self, left: f64);

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;
}

/// Document-level lookups and element creation.
pub trait UiDocument {
    /// Node handle type produced by this document.
    type Node: UiNode;

    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Element with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Create a detached element with the given tag name.
    fn create_element(&self, tag: &str) -> Result<Self::Node>;
}

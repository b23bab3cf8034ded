#![forbid(unsafe_code)]

//! Featured-works accordion.
//!
//! Exactly one item is active at any time after construction. Pointer
//! movement, clicks and focus move the active item and mark it hovered; when
//! the pointer leaves the grid the last active item falls back to the idle
//! "default-open" presentation.
//!
//! Column sizing is written to `grid-template-columns` with the active column
//! weighted [`ACTIVE_WEIGHT`] and every other column weighted 1.

use crate::node::UiNode;

pub const ACTIVE_CLASS: &str = "active";
pub const HOVERED_CLASS: &str = "is-hovered";
pub const DEFAULT_OPEN_CLASS: &str = "default-open";
/// Custom property holding the widest item's natural width.
pub const ITEM_WIDTH_PROPERTY: &str = "--featured-item-width";
pub const COLUMNS_PROPERTY: &str = "grid-template-columns";
pub const ACTIVE_WEIGHT: u32 = 10;

/// Track list with column `active` emphasized, e.g. `1fr 10fr 1fr`.
#[must_use]
pub fn grid_columns(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| {
            if i == active {
                format!("{ACTIVE_WEIGHT}fr")
            } else {
                "1fr".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accordion over a fixed, non-empty item set.
#[derive(Debug, Clone)]
pub struct FeaturedAccordion<N> {
    grid: N,
    items: Vec<N>,
    active_index: usize,
}

impl<N: UiNode> FeaturedAccordion<N> {
    /// Build the accordion and apply its initial state. Returns `None` when
    /// the grid has no items.
    pub fn install(grid: N, items: Vec<N>) -> Option<Self> {
        if items.is_empty() {
            tracing::debug!(target: "folio.featured", "no featured items; accordion disabled");
            return None;
        }
        let accordion = Self {
            grid,
            items,
            active_index: 0,
        };
        accordion.show_idle();
        accordion.update_item_width();
        tracing::debug!(
            target: "folio.featured",
            items = accordion.items.len(),
            "accordion installed"
        );
        Some(accordion)
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn items(&self) -> &[N] {
        &self.items
    }

    /// Index of the item that is or contains `target`.
    #[must_use]
    pub fn item_index_of(&self, target: &N) -> Option<usize> {
        self.items.iter().position(|item| item.contains(target))
    }

    /// Pointer move, click or focus on `target`. Returns whether the event
    /// landed on an item; events outside every item change nothing.
    pub fn activate_target(&mut self, target: &N) -> bool {
        let Some(index) = self.item_index_of(target) else {
            return false;
        };
        self.activate(index);
        true
    }

    fn activate(&mut self, index: usize) {
        if index != self.active_index {
            tracing::trace!(target: "folio.featured", index, "active item changed");
        }
        self.active_index = index;
        for (i, item) in self.items.iter().enumerate() {
            let on = i == index;
            item.set_class(HOVERED_CLASS, on);
            item.set_class(ACTIVE_CLASS, on);
            item.remove_class(DEFAULT_OPEN_CLASS);
        }
        self.apply_columns();
    }

    /// Pointer left the grid: restore the idle view on the last active item.
    pub fn pointer_leave(&self) {
        for item in &self.items {
            item.remove_class(HOVERED_CLASS);
            item.remove_class(ACTIVE_CLASS);
        }
        self.show_idle();
    }

    fn show_idle(&self) {
        let item = &self.items[self.active_index];
        item.add_class(ACTIVE_CLASS);
        item.add_class(DEFAULT_OPEN_CLASS);
        self.apply_columns();
    }

    fn apply_columns(&self) {
        self.grid.set_style(
            COLUMNS_PROPERTY,
            &grid_columns(self.items.len(), self.active_index),
        );
    }

    /// Publish the widest item's natural width for layout stabilization.
    /// Runs at install and on every window resize.
    pub fn update_item_width(&self) {
        let widest = self
            .items
            .iter()
            .map(UiNode::scroll_width)
            .fold(0.0_f64, f64::max);
        self.grid
            .set_style(ITEM_WIDTH_PROPERTY, &format!("{widest}px"));
    }
}

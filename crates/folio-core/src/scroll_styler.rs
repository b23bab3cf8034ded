#![forbid(unsafe_code)]

//! Header scroll-state styling.

use crate::node::UiNode;

/// Class set on the header once the page is scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Toggles the header's `scrolled` flag from the vertical scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollStyler<N> {
    header: N,
    threshold: f64,
}

impl<N: UiNode> ScrollStyler<N> {
    #[must_use]
    pub fn new(header: N, threshold: f64) -> Self {
        Self { header, threshold }
    }

    /// Whether `scroll_y` counts as scrolled. Strictly greater than the
    /// threshold: an offset equal to it is still "at top".
    #[must_use]
    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    /// Apply the flag for `scroll_y`.
    pub fn on_scroll(&self, scroll_y: f64) {
        let scrolled = self.is_scrolled(scroll_y);
        if self.header.has_class(SCROLLED_CLASS) != scrolled {
            tracing::trace!(target: "folio.scroll", scroll_y, scrolled, "header state changed");
        }
        self.header.set_class(SCROLLED_CLASS, scrolled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessNode;
    use proptest::prelude::*;

    fn styler() -> (HeadlessNode, ScrollStyler<HeadlessNode>) {
        let header = HeadlessNode::element("header");
        (header.clone(), ScrollStyler::new(header, 50.0))
    }

    #[test]
    fn boundary_at_threshold_is_not_scrolled() {
        let (header, styler) = styler();
        styler.on_scroll(50.0);
        assert!(!header.has_class(SCROLLED_CLASS));
        styler.on_scroll(50.5);
        assert!(header.has_class(SCROLLED_CLASS));
        styler.on_scroll(0.0);
        assert!(!header.has_class(SCROLLED_CLASS));
    }

    #[test]
    fn repeated_scrolls_are_idempotent() {
        let (header, styler) = styler();
        styler.on_scroll(200.0);
        styler.on_scroll(300.0);
        assert_eq!(header.classes(), vec![SCROLLED_CLASS.to_string()]);
    }

    proptest! {
        #[test]
        fn flag_tracks_threshold(offsets in prop::collection::vec(0.0f64..400.0, 1..50)) {
            let (header, styler) = styler();
            for y in offsets {
                styler.on_scroll(y);
                prop_assert_eq!(header.has_class(SCROLLED_CLASS), y > 50.0);
            }
        }
    }
}

#![forbid(unsafe_code)]

//! Seamless auto-scrolling testimonial strip.
//!
//! The original items are cloned once and appended, so the strip shows the
//! same content twice back to back. Each frame advances the scroll offset and
//! wraps it to zero once it covers one original set, which is invisible
//! because the second half looks exactly like the first.
//!
//! The strip stays user-scrollable: a container offset that moved away from
//! the last written value (touch, trackpad, scrollbar) becomes the new
//! starting point.

use crate::error::Result;
use crate::node::UiNode;

/// Drift between the container offset and the last write that counts as a
/// user scroll. Smaller drift is host rounding of fractional offsets.
pub const USER_SCROLL_TOLERANCE: f64 = 1.0;

/// Testimonial carousel state.
#[derive(Debug, Clone)]
pub struct TestimonialCarousel<N> {
    container: N,
    original_count: usize,
    speed: f64,
    offset: f64,
    written: f64,
    paused: bool,
}

impl<N: UiNode> TestimonialCarousel<N> {
    /// Duplicate the container's items and start at offset 0.
    pub fn install(container: N, speed: f64) -> Result<Self> {
        let originals = container.children();
        for item in &originals {
            let copy = item.clone_deep()?;
            container.append_child(&copy)?;
        }
        container.set_scroll_left(0.0);
        tracing::debug!(
            target: "folio.carousel",
            items = originals.len(),
            speed,
            "carousel installed"
        );
        Ok(Self {
            container,
            original_count: originals.len(),
            speed,
            offset: 0.0,
            written: 0.0,
            paused: false,
        })
    }

    #[must_use]
    pub const fn original_count(&self) -> usize {
        self.original_count
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Hover state of the container.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::trace!(target: "folio.carousel", paused, "hover state changed");
        }
        self.paused = paused;
    }

    /// Width of one unduplicated set: rendered widths plus horizontal margins.
    /// Measured fresh on every call so layout changes are picked up.
    #[must_use]
    pub fn original_set_width(&self) -> f64 {
        self.container
            .children()
            .iter()
            .take(self.original_count)
            .map(|item| item.offset_width() + item.horizontal_margins())
            .sum()
    }

    /// Per-frame update. A no-op while paused; the caller keeps scheduling
    /// frames either way.
    pub fn frame(&mut self) {
        if self.paused {
            return;
        }
        let current = self.container.scroll_left();
        if (current - self.written).abs() >= USER_SCROLL_TOLERANCE {
            tracing::trace!(
                target: "folio.carousel",
                from = self.offset,
                to = current,
                "user scroll adopted"
            );
            self.offset = current;
        }
        let width = self.original_set_width();
        self.offset += self.speed;
        if self.offset >= width {
            self.offset = 0.0;
        }
        self.container.set_scroll_left(self.offset);
        self.written = self.offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessLayout, HeadlessNode};
    use proptest::prelude::*;

    fn card(width: f64, margin: f64) -> HeadlessNode {
        HeadlessNode::element("div")
            .with_class("testimonial")
            .with_layout(HeadlessLayout {
                offset_width: width,
                margin_left: margin,
                margin_right: margin,
                ..HeadlessLayout::default()
            })
            .with_children([HeadlessNode::element("p")])
    }

    fn strip(widths: &[f64]) -> HeadlessNode {
        HeadlessNode::element("div")
            .with_class("testimonials-container")
            .with_children(widths.iter().map(|w| card(*w, 1.0)))
    }

    #[test]
    fn install_duplicates_items_once() {
        let container = strip(&[10.0, 20.0, 30.0]);
        let first = container.children()[0].clone();
        let carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        let children = container.children();
        assert_eq!(carousel.original_count(), 3);
        assert_eq!(children.len(), 6);
        assert_eq!(children[0], first);
        assert_ne!(children[3], first);
        assert_eq!(children[3].children().len(), 1);
    }

    #[test]
    fn set_width_counts_only_originals_with_margins() {
        let container = strip(&[10.0, 20.0]);
        let carousel = TestimonialCarousel::install(container, 0.5).expect("install");
        assert_eq!(carousel.original_set_width(), 34.0);
    }

    #[test]
    fn advances_and_wraps_to_exactly_zero() {
        let container = strip(&[1.0]);
        // One item of width 1 plus margins 1 + 1: W = 3.
        let mut carousel = TestimonialCarousel::install(container.clone(), 1.25).expect("install");
        carousel.frame();
        assert_eq!(container.scroll_left(), 1.25);
        carousel.frame();
        assert_eq!(carousel.offset(), 2.5);
        carousel.frame();
        assert_eq!(carousel.offset(), 0.0, "3.75 >= 3 wraps to 0, not 0.75");
        assert_eq!(container.scroll_left(), 0.0);
    }

    #[test]
    fn paused_frames_do_nothing() {
        let container = strip(&[100.0]);
        let mut carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        carousel.frame();
        carousel.set_paused(true);
        for _ in 0..10 {
            carousel.frame();
        }
        assert_eq!(carousel.offset(), 0.5);
        carousel.set_paused(false);
        carousel.frame();
        assert_eq!(container.scroll_left(), 1.0);
    }

    #[test]
    fn user_scroll_becomes_the_new_offset() {
        let container = strip(&[400.0, 400.0]);
        let mut carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        carousel.frame();
        container.set_scroll_left(300.0);
        carousel.frame();
        assert_eq!(carousel.offset(), 300.5);
        assert_eq!(container.scroll_left(), 300.5);
    }

    #[test]
    fn user_scroll_while_paused_is_kept_on_resume() {
        let container = strip(&[400.0, 400.0]);
        let mut carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        carousel.set_paused(true);
        container.set_scroll_left(120.0);
        carousel.frame();
        assert_eq!(container.scroll_left(), 120.0);
        carousel.set_paused(false);
        carousel.frame();
        assert_eq!(carousel.offset(), 120.5);
    }

    #[test]
    fn host_rounding_keeps_fractional_progress() {
        let container = strip(&[400.0, 400.0]);
        let mut carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        carousel.frame();
        // A host that stores whole pixels reads 0.5 back as 0.
        container.set_scroll_left(0.0);
        carousel.frame();
        assert_eq!(carousel.offset(), 1.0);
    }

    #[test]
    fn user_scroll_past_one_set_wraps() {
        let container = strip(&[1.0]);
        let mut carousel = TestimonialCarousel::install(container.clone(), 0.5).expect("install");
        container.set_scroll_left(5.0);
        carousel.frame();
        assert_eq!(carousel.offset(), 0.0);
    }

    #[test]
    fn read_only_container_fails_install() {
        let container = strip(&[10.0]);
        container.set_read_only(true);
        assert!(TestimonialCarousel::install(container.clone(), 0.5).is_err());
        assert_eq!(container.children().len(), 1);
    }

    #[test]
    fn empty_container_stays_at_zero() {
        let container = HeadlessNode::element("div");
        let mut carousel = TestimonialCarousel::install(container, 0.5).expect("install");
        carousel.frame();
        assert_eq!(carousel.offset(), 0.0);
    }

    proptest! {
        #[test]
        fn offset_stays_within_one_set(
            widths in prop::collection::vec(1.0f64..50.0, 1..6),
            speed in 0.1f64..20.0,
            frames in 1usize..500,
        ) {
            let container = strip(&widths);
            let mut carousel = TestimonialCarousel::install(container, speed).expect("install");
            let width = carousel.original_set_width();
            for _ in 0..frames {
                carousel.frame();
                prop_assert!(carousel.offset() >= 0.0);
                prop_assert!(carousel.offset() < width);
            }
        }
    }
}

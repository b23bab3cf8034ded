#![forbid(unsafe_code)]

//! Event subscription and host command types.
//!
//! The host wires each [`Subscription`] to its UI event source. When a wired
//! event fires, the host builds the matching [`PageEvent`] (see
//! [`Route::into_event`]) and hands it to `Portfolio::dispatch`, which returns
//! a [`Dispatch`] listing what the host must do next.

use crate::node::UiNode;

/// Where a subscription listens.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<N> {
    Window,
    Document,
    Node(N),
}

/// How a fired host event maps onto a [`PageEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Scroll,
    Resize,
    MenuToggle,
    NavLink,
    /// Document-wide click; the event target is needed.
    OutsideClick,
    Anchor { href: String },
    /// Pointer move, click or focus on the featured grid; target needed.
    FeaturedPointer,
    FeaturedLeave,
    ContactSubmit,
    CarouselEnter,
    CarouselLeave,
}

impl Route {
    /// Whether the host should call `preventDefault` before dispatching
    /// regardless of the outcome (form submission never reaches the network).
    #[must_use]
    pub const fn always_prevents_default(&self) -> bool {
        matches!(self, Self::ContactSubmit)
    }

    /// Build the page event for a fired host event.
    ///
    /// `target` is the event's target node, `scroll_y` the window's current
    /// vertical scroll. Returns `None` when a target-dependent route fired
    /// without a usable target.
    #[must_use]
    pub fn into_event<N: UiNode>(self, target: Option<N>, scroll_y: f64) -> Option<PageEvent<N>> {
        Some(match self {
            Self::Scroll => PageEvent::Scroll { scroll_y },
            Self::Resize => PageEvent::Resize,
            Self::MenuToggle => PageEvent::MenuToggle,
            Self::NavLink => PageEvent::NavLinkActivated,
            Self::OutsideClick => PageEvent::DocumentClick { target: target? },
            Self::Anchor { href } => PageEvent::AnchorActivated { href },
            Self::FeaturedPointer => PageEvent::FeaturedPointer { target: target? },
            Self::FeaturedLeave => PageEvent::FeaturedLeave,
            Self::ContactSubmit => PageEvent::ContactSubmit,
            Self::CarouselEnter => PageEvent::CarouselHover { hovered: true },
            Self::CarouselLeave => PageEvent::CarouselHover { hovered: false },
        })
    }
}

/// One event source the host must wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription<N> {
    pub target: ListenTarget<N>,
    /// Host event name (`scroll`, `click`, `pointermove`, ...).
    pub event: &'static str,
    pub route: Route,
}

impl<N> Subscription<N> {
    #[must_use]
    pub fn new(target: ListenTarget<N>, event: &'static str, route: Route) -> Self {
        Self {
            target,
            event,
            route,
        }
    }
}

/// Events the page components react to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    Scroll { scroll_y: f64 },
    Resize,
    MenuToggle,
    NavLinkActivated,
    DocumentClick { target: N },
    AnchorActivated { href: String },
    FeaturedPointer { target: N },
    FeaturedLeave,
    ContactSubmit,
    /// Viewport intersection change for an element of reveal group `group`.
    Intersection {
        group: usize,
        target: N,
        intersecting: bool,
    },
    AnimationFrame,
    CarouselHover { hovered: bool },
}

/// Work the host performs on behalf of the core.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand<N> {
    /// Scroll the window vertically.
    ScrollWindowTo { top: f64, smooth: bool },
    /// Start observing `node` for reveal group `group` after `delay_ms`.
    ObserveAfter {
        group: usize,
        node: N,
        delay_ms: u32,
    },
    /// Stop observing `node` in reveal group `group`.
    Unobserve { group: usize, node: N },
    /// Schedule the next animation frame callback.
    RequestFrame,
}

/// Outcome of dispatching one [`PageEvent`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<N> {
    pub prevent_default: bool,
    pub commands: Vec<HostCommand<N>>,
}

impl<N> Default for Dispatch<N> {
    fn default() -> Self {
        Self {
            prevent_default: false,
            commands: Vec::new(),
        }
    }
}

impl<N> Dispatch<N> {
    /// Nothing to do.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Single command, no default prevention.
    #[must_use]
    pub fn command(command: HostCommand<N>) -> Self {
        Self {
            prevent_default: false,
            commands: vec![command],
        }
    }

    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessNode;

    #[test]
    fn target_routes_require_a_target() {
        assert_eq!(
            Route::OutsideClick.into_event::<HeadlessNode>(None, 0.0),
            None
        );
        assert_eq!(
            Route::FeaturedPointer.into_event::<HeadlessNode>(None, 0.0),
            None
        );
        let node = HeadlessNode::element("div");
        assert_eq!(
            Route::FeaturedPointer.into_event(Some(node.clone()), 0.0),
            Some(PageEvent::FeaturedPointer { target: node })
        );
    }

    #[test]
    fn scroll_route_carries_offset() {
        assert_eq!(
            Route::Scroll.into_event::<HeadlessNode>(None, 72.5),
            Some(PageEvent::Scroll { scroll_y: 72.5 })
        );
    }

    #[test]
    fn only_submission_always_prevents_default() {
        assert!(Route::ContactSubmit.always_prevents_default());
        assert!(!Route::Anchor { href: "#a".into() }.always_prevents_default());
        assert!(!Route::MenuToggle.always_prevents_default());
    }
}

#![forbid(unsafe_code)]

//! Mobile navigation toggle and in-page anchor scrolling.
//!
//! The panel and its toggle are optional: when either is missing from the
//! markup the open/close behavior is disabled, while anchor scrolling keeps
//! working since it only needs the document.

use crate::event::HostCommand;
use crate::node::{UiDocument, UiNode};

/// Class that marks the nav panel as open.
pub const NAV_OPEN_CLASS: &str = "active";

/// Mobile nav panel state plus anchor scroll resolution.
#[derive(Debug, Clone)]
pub struct NavigationController<N> {
    panel: Option<(N, N)>,
    anchor_offset: f64,
}

impl<N: UiNode> NavigationController<N> {
    /// `toggle` and `panel` are the menu button and the nav panel.
    #[must_use]
    pub fn new(toggle: Option<N>, panel: Option<N>, anchor_offset: f64) -> Self {
        let panel = match (toggle, panel) {
            (Some(toggle), Some(panel)) => Some((toggle, panel)),
            (toggle, panel) => {
                tracing::debug!(
                    target: "folio.nav",
                    has_toggle = toggle.is_some(),
                    has_panel = panel.is_some(),
                    "mobile nav disabled"
                );
                None
            }
        };
        Self {
            panel,
            anchor_offset,
        }
    }

    /// Whether the toggle/close behavior is wired.
    #[must_use]
    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    /// The menu button, when the panel is wired.
    #[must_use]
    pub fn toggle_node(&self) -> Option<&N> {
        self.panel.as_ref().map(|(toggle, _)| toggle)
    }

    /// Whether the panel is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel
            .as_ref()
            .is_some_and(|(_, panel)| panel.has_class(NAV_OPEN_CLASS))
    }

    /// Menu button activated: flip the panel state.
    pub fn toggle(&self) {
        if let Some((_, panel)) = &self.panel {
            let open = panel.toggle_class(NAV_OPEN_CLASS);
            tracing::debug!(target: "folio.nav", open, "menu toggled");
        }
    }

    /// A nav link was activated.
    pub fn link_activated(&self) {
        self.close();
    }

    /// A click landed on `target` somewhere in the document. Closes the open
    /// panel unless the click is inside the panel or on the toggle.
    pub fn document_click(&self, target: &N) {
        let Some((toggle, panel)) = &self.panel else {
            return;
        };
        if self.is_open() && !panel.contains(target) && !toggle.contains(target) {
            tracing::debug!(target: "folio.nav", "outside click closes menu");
            self.close();
        }
    }

    fn close(&self) {
        if let Some((_, panel)) = &self.panel {
            panel.remove_class(NAV_OPEN_CLASS);
        }
    }

    /// Resolve an in-page link. Returns the scroll command when `href` names
    /// an existing element; the caller must then prevent default navigation.
    /// Bare `#`, non-fragment links and unknown ids yield `None`.
    pub fn anchor_scroll<D>(&self, document: &D, href: &str) -> Option<HostCommand<N>>
    where
        D: UiDocument<Node = N>,
    {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let Some(target) = document.element_by_id(id) else {
            tracing::debug!(target: "folio.nav", href, "anchor target missing");
            return None;
        };
        let top = target.offset_top() - self.anchor_offset;
        tracing::debug!(target: "folio.nav", href, top, "smooth scroll to anchor");
        Some(HostCommand::ScrollWindowTo { top, smooth: true })
    }
}

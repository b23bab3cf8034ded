#![forbid(unsafe_code)]

//! Composition root.
//!
//! [`Portfolio`] owns one instance of every page component, built once at
//! startup from a document and a [`SiteConfig`]. Hosts:
//! 1. call [`Portfolio::install`] and execute the returned startup commands,
//! 2. wire every entry of [`Portfolio::subscriptions`],
//! 3. feed fired events to [`Portfolio::dispatch`] and execute the returned
//!    [`Dispatch`].

use serde::Serialize;

use crate::carousel::TestimonialCarousel;
use crate::config::SiteConfig;
use crate::contact::ContactFormDemo;
use crate::error::Result;
use crate::event::{Dispatch, HostCommand, ListenTarget, PageEvent, Route, Subscription};
use crate::featured::FeaturedAccordion;
use crate::navigation::NavigationController;
use crate::node::{UiDocument, UiNode};
use crate::reveal::{ObserverOptions, RevealProgress, ScrollRevealAnimator};
use crate::scroll_styler::ScrollStyler;

/// Serializable view of component state for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    pub header_bound: bool,
    pub nav_open: bool,
    pub featured_active: Option<usize>,
    pub featured_items: usize,
    pub carousel_offset: Option<f64>,
    pub carousel_paused: Option<bool>,
    pub contact_bound: bool,
    pub reveal: Vec<RevealProgress>,
}

/// Every page component, owned together.
#[derive(Debug)]
pub struct Portfolio<D: UiDocument> {
    document: D,
    config: SiteConfig,
    scroll: Option<ScrollStyler<D::Node>>,
    nav: NavigationController<D::Node>,
    nav_links: Vec<D::Node>,
    anchors: Vec<(D::Node, String)>,
    contact: Option<(D::Node, ContactFormDemo<D::Node>)>,
    reveal: ScrollRevealAnimator<D::Node>,
    featured: Option<(D::Node, FeaturedAccordion<D::Node>)>,
    carousel: Option<(D::Node, TestimonialCarousel<D::Node>)>,
}

impl<D: UiDocument> Portfolio<D> {
    /// Initialize every component against `document`.
    ///
    /// Components whose root element is missing, or whose setup the host
    /// rejects, are left disabled while the rest of the page still installs.
    /// Only an invalid `config` fails the whole install. Returns the startup
    /// host commands: the reveal observation schedule, followed by the first
    /// frame request when a carousel is present.
    pub fn install(
        document: D,
        config: SiteConfig,
    ) -> Result<(Self, Vec<HostCommand<D::Node>>)> {
        config.validate()?;
        let s = &config.selectors;

        let scroll = document
            .query(&s.header)
            .map(|header| ScrollStyler::new(header, config.scroll_threshold));

        let nav = NavigationController::new(
            document.query(&s.menu_toggle),
            document.query(&s.nav_panel),
            config.anchor_offset,
        );
        let nav_links = if nav.has_panel() {
            document.query_all(&s.nav_links)
        } else {
            Vec::new()
        };
        let anchors: Vec<_> = document
            .query_all(&s.anchor_links)
            .into_iter()
            .filter_map(|anchor| {
                let href = anchor.attribute("href")?;
                Some((anchor, href))
            })
            .collect();

        let contact = document
            .element_by_id(&s.contact_form_id)
            .map(|form| (form.clone(), ContactFormDemo::new(form, s.contact_fields.clone())));

        let (reveal, mut commands) = ScrollRevealAnimator::install(
            &document,
            &config.reveal_groups,
            ObserverOptions::with_threshold(config.reveal_threshold),
        );

        let featured = document.query(&s.featured_grid).and_then(|grid| {
            let items = grid.query_all(&s.featured_item);
            FeaturedAccordion::install(grid.clone(), items).map(|accordion| (grid, accordion))
        });

        let carousel = document.query(&s.testimonials).and_then(|container| {
            match TestimonialCarousel::install(container.clone(), config.carousel_speed) {
                Ok(carousel) => Some((container, carousel)),
                Err(err) => {
                    tracing::error!(
                        target: "folio.page",
                        error = %err,
                        "carousel install failed; carousel disabled"
                    );
                    None
                }
            }
        });
        if carousel.is_some() {
            commands.push(HostCommand::RequestFrame);
        }

        for (component, present) in [
            ("header", scroll.is_some()),
            ("navigation", nav.has_panel()),
            ("contact", contact.is_some()),
            ("featured", featured.is_some()),
            ("carousel", carousel.is_some()),
        ] {
            if !present {
                tracing::debug!(target: "folio.page", component, "component disabled");
            }
        }
        tracing::info!(
            target: "folio.page",
            header = scroll.is_some(),
            nav = nav.has_panel(),
            anchors = anchors.len(),
            contact = contact.is_some(),
            featured = featured.is_some(),
            carousel = carousel.is_some(),
            reveal_groups = reveal.group_count(),
            "page components installed"
        );

        Ok((
            Self {
                document,
                config,
                scroll,
                nav,
                nav_links,
                anchors,
                contact,
                reveal,
                featured,
                carousel,
            },
            commands,
        ))
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn reveal(&self) -> &ScrollRevealAnimator<D::Node> {
        &self.reveal
    }

    /// Event sources the host must wire, in installation order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription<D::Node>> {
        let mut subs = Vec::new();
        if self.scroll.is_some() {
            subs.push(Subscription::new(ListenTarget::Window, "scroll", Route::Scroll));
        }
        if let Some((form, _)) = &self.contact {
            subs.push(Subscription::new(
                ListenTarget::Node(form.clone()),
                "submit",
                Route::ContactSubmit,
            ));
        }
        if self.nav.has_panel() {
            if let Some(toggle) = self.nav.toggle_node() {
                subs.push(Subscription::new(
                    ListenTarget::Node(toggle.clone()),
                    "click",
                    Route::MenuToggle,
                ));
            }
            subs.extend(self.nav_links.iter().map(|link| {
                Subscription::new(ListenTarget::Node(link.clone()), "click", Route::NavLink)
            }));
            subs.push(Subscription::new(
                ListenTarget::Document,
                "click",
                Route::OutsideClick,
            ));
        }
        subs.extend(self.anchors.iter().map(|(anchor, href)| {
            Subscription::new(
                ListenTarget::Node(anchor.clone()),
                "click",
                Route::Anchor { href: href.clone() },
            )
        }));
        if let Some((grid, _)) = &self.featured {
            for event in ["pointermove", "click", "focusin"] {
                subs.push(Subscription::new(
                    ListenTarget::Node(grid.clone()),
                    event,
                    Route::FeaturedPointer,
                ));
            }
            subs.push(Subscription::new(
                ListenTarget::Node(grid.clone()),
                "pointerleave",
                Route::FeaturedLeave,
            ));
            subs.push(Subscription::new(ListenTarget::Window, "resize", Route::Resize));
        }
        if let Some((container, _)) = &self.carousel {
            subs.push(Subscription::new(
                ListenTarget::Node(container.clone()),
                "mouseenter",
                Route::CarouselEnter,
            ));
            subs.push(Subscription::new(
                ListenTarget::Node(container.clone()),
                "mouseleave",
                Route::CarouselLeave,
            ));
        }
        subs
    }

    /// Route one event to its component.
    ///
    /// The only error is a failed contact submission; by then default
    /// submission has already been prevented by the host.
    pub fn dispatch(&mut self, event: PageEvent<D::Node>) -> Result<Dispatch<D::Node>> {
        let dispatch = match event {
            PageEvent::Scroll { scroll_y } => {
                if let Some(scroll) = &self.scroll {
                    scroll.on_scroll(scroll_y);
                }
                Dispatch::none()
            }
            PageEvent::Resize => {
                if let Some((_, featured)) = &self.featured {
                    featured.update_item_width();
                }
                Dispatch::none()
            }
            PageEvent::MenuToggle => {
                self.nav.toggle();
                Dispatch::none()
            }
            PageEvent::NavLinkActivated => {
                self.nav.link_activated();
                Dispatch::none()
            }
            PageEvent::DocumentClick { target } => {
                self.nav.document_click(&target);
                Dispatch::none()
            }
            PageEvent::AnchorActivated { href } => {
                match self.nav.anchor_scroll(&self.document, &href) {
                    Some(command) => Dispatch::command(command).prevented(),
                    None => Dispatch::none(),
                }
            }
            PageEvent::FeaturedPointer { target } => {
                if let Some((_, featured)) = &mut self.featured {
                    featured.activate_target(&target);
                }
                Dispatch::none()
            }
            PageEvent::FeaturedLeave => {
                if let Some((_, featured)) = &self.featured {
                    featured.pointer_leave();
                }
                Dispatch::none()
            }
            PageEvent::ContactSubmit => {
                if let Some((_, contact)) = &self.contact {
                    contact.submit(&self.document)?;
                }
                Dispatch::none().prevented()
            }
            PageEvent::Intersection {
                group,
                target,
                intersecting,
            } => match self.reveal.on_intersection(group, &target, intersecting) {
                Some(command) => Dispatch::command(command),
                None => Dispatch::none(),
            },
            PageEvent::AnimationFrame => match &mut self.carousel {
                Some((_, carousel)) => {
                    carousel.frame();
                    Dispatch::command(HostCommand::RequestFrame)
                }
                None => Dispatch::none(),
            },
            PageEvent::CarouselHover { hovered } => {
                if let Some((_, carousel)) = &mut self.carousel {
                    carousel.set_paused(hovered);
                }
                Dispatch::none()
            }
        };
        Ok(dispatch)
    }

    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            header_bound: self.scroll.is_some(),
            nav_open: self.nav.is_open(),
            featured_active: self.featured.as_ref().map(|(_, f)| f.active_index()),
            featured_items: self.featured.as_ref().map_or(0, |(_, f)| f.item_count()),
            carousel_offset: self.carousel.as_ref().map(|(_, c)| c.offset()),
            carousel_paused: self.carousel.as_ref().map(|(_, c)| c.is_paused()),
            contact_bound: self.contact.is_some(),
            reveal: self.reveal.progress(),
        }
    }
}

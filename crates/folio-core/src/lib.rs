#![forbid(unsafe_code)]

//! `folio-core` holds the interaction logic of the folio portfolio page.
//!
//! Design goals:
//! - **Host-agnostic**: components operate on the [`UiNode`]/[`UiDocument`]
//!   traits, never on a concrete UI toolkit.
//! - **Explicit wiring**: [`Portfolio::subscriptions`] lists every event
//!   source; [`Portfolio::dispatch`] returns the host commands to run.
//! - **Deterministic**: no clocks, timers or threads here. Timers, frames and
//!   viewport observers belong to the host and arrive as [`PageEvent`]s.
//!
//! [`headless`] provides an in-memory document so every component runs
//! natively in tests. `folio-web` provides the browser host.

pub mod carousel;
pub mod config;
pub mod contact;
pub mod error;
pub mod event;
pub mod featured;
pub mod headless;
pub mod navigation;
pub mod node;
pub mod portfolio;
pub mod reveal;
pub mod scroll_styler;

pub use carousel::TestimonialCarousel;
pub use config::{RevealGroupConfig, SelectorConfig, SiteConfig};
pub use contact::{ContactFormDemo, ContactSubmission};
pub use error::{FolioError, Result};
pub use event::{Dispatch, HostCommand, ListenTarget, PageEvent, Route, Subscription};
pub use featured::FeaturedAccordion;
pub use navigation::NavigationController;
pub use node::{UiDocument, UiNode};
pub use portfolio::{Portfolio, PortfolioSnapshot};
pub use reveal::{ObserverOptions, ScrollRevealAnimator};
pub use scroll_styler::ScrollStyler;

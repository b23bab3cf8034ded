#![forbid(unsafe_code)]

//! One-shot scroll reveal.
//!
//! Each configured selector group is processed independently. At install
//! every match is hidden and offset, and element `i` of the group is queued
//! for observation after `i * stagger_ms`. The first intersecting entry for an
//! element fades it in and stops observing it for good; nothing can hide it
//! again.

use serde::Serialize;

use crate::config::RevealGroupConfig;
use crate::event::HostCommand;
use crate::node::{UiDocument, UiNode};

pub const HIDDEN_OPACITY: &str = "0";
pub const HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const SHOWN_OPACITY: &str = "1";
pub const SHOWN_TRANSFORM: &str = "translateY(0)";
pub const REVEAL_TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";

/// Observer options shared by every group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl ObserverOptions {
    #[must_use]
    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: "0px",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealState {
    Hidden,
    Revealed,
}

#[derive(Debug, Clone)]
struct RevealGroup<N> {
    selector: String,
    stagger_ms: u32,
    elements: Vec<(N, RevealState)>,
}

/// Per-group progress for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealProgress {
    pub selector: String,
    pub total: usize,
    pub revealed: usize,
}

/// Drives the reveal groups.
#[derive(Debug, Clone)]
pub struct ScrollRevealAnimator<N> {
    groups: Vec<RevealGroup<N>>,
    options: ObserverOptions,
}

impl<N: UiNode> ScrollRevealAnimator<N> {
    /// Hide every element of every group and return the observation schedule.
    pub fn install<D>(
        document: &D,
        groups: &[RevealGroupConfig],
        options: ObserverOptions,
    ) -> (Self, Vec<HostCommand<N>>)
    where
        D: UiDocument<Node = N>,
    {
        let mut commands = Vec::new();
        let groups = groups
            .iter()
            .enumerate()
            .map(|(group, config)| {
                let elements = document.query_all(&config.selector);
                for (index, element) in elements.iter().enumerate() {
                    element.set_style("opacity", HIDDEN_OPACITY);
                    element.set_style("transform", HIDDEN_TRANSFORM);
                    let delay_ms = u32::try_from(index)
                        .unwrap_or(u32::MAX)
                        .saturating_mul(config.stagger_ms);
                    commands.push(HostCommand::ObserveAfter {
                        group,
                        node: element.clone(),
                        delay_ms,
                    });
                }
                tracing::debug!(
                    target: "folio.reveal",
                    selector = %config.selector,
                    stagger_ms = config.stagger_ms,
                    elements = elements.len(),
                    "reveal group installed"
                );
                RevealGroup {
                    selector: config.selector.clone(),
                    stagger_ms: config.stagger_ms,
                    elements: elements
                        .into_iter()
                        .map(|element| (element, RevealState::Hidden))
                        .collect(),
                }
            })
            .collect();
        (Self { groups, options }, commands)
    }

    #[must_use]
    pub const fn options(&self) -> ObserverOptions {
        self.options
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Stagger of group `group`, if it exists.
    #[must_use]
    pub fn stagger_ms(&self, group: usize) -> Option<u32> {
        self.groups.get(group).map(|g| g.stagger_ms)
    }

    /// Handle an intersection entry. Returns the unobserve command when this
    /// entry revealed the element.
    pub fn on_intersection(
        &mut self,
        group: usize,
        target: &N,
        intersecting: bool,
    ) -> Option<HostCommand<N>> {
        if !intersecting {
            return None;
        }
        let entry = self
            .groups
            .get_mut(group)?
            .elements
            .iter_mut()
            .find(|(element, _)| element == target)?;
        if entry.1 == RevealState::Revealed {
            return None;
        }
        entry.1 = RevealState::Revealed;
        let element = &entry.0;
        element.set_style("opacity", SHOWN_OPACITY);
        element.set_style("transform", SHOWN_TRANSFORM);
        element.set_style("transition", REVEAL_TRANSITION);
        tracing::trace!(target: "folio.reveal", group, "element revealed");
        Some(HostCommand::Unobserve {
            group,
            node: element.clone(),
        })
    }

    #[must_use]
    pub fn progress(&self) -> Vec<RevealProgress> {
        self.groups
            .iter()
            .map(|group| RevealProgress {
                selector: group.selector.clone(),
                total: group.elements.len(),
                revealed: group
                    .elements
                    .iter()
                    .filter(|(_, state)| *state == RevealState::Revealed)
                    .count(),
            })
            .collect()
    }
}

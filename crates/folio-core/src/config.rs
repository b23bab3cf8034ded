#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every selector, threshold and timing constant the components use lives in
//! [`SiteConfig`]. The defaults match the reference portfolio markup; hosts
//! override any subset by passing JSON to [`SiteConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// One scroll-reveal selector group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealGroupConfig {
    /// Selector list whose matches are revealed.
    pub selector: String,
    /// Delay between successive elements starting observation, in ms.
    #[serde(default)]
    pub stagger_ms: u32,
}

impl RevealGroupConfig {
    /// Group for `selector` with the given stagger.
    #[must_use]
    pub fn new(selector: impl Into<String>, stagger_ms: u32) -> Self {
        Self {
            selector: selector.into(),
            stagger_ms,
        }
    }
}

/// DOM selectors the page components bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub header: String,
    pub menu_toggle: String,
    pub nav_panel: String,
    pub nav_links: String,
    pub anchor_links: String,
    pub featured_grid: String,
    pub featured_item: String,
    pub contact_form_id: String,
    /// Field ids read on submission: name, email, subject, message.
    pub contact_fields: [String; 4],
    pub testimonials: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            header: "header".into(),
            menu_toggle: ".menu-toggle".into(),
            nav_panel: ".nav-links".into(),
            nav_links: ".nav-links a".into(),
            anchor_links: "a[href^=\"#\"]".into(),
            featured_grid: ".featured-grid".into(),
            featured_item: ".featured-item".into(),
            contact_form_id: "contact-form".into(),
            contact_fields: [
                "name".into(),
                "email".into(),
                "subject".into(),
                "message".into(),
            ],
            testimonials: ".testimonials-container".into(),
        }
    }
}

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: SelectorConfig,
    /// Header gets `scrolled` when vertical scroll exceeds this, in px.
    pub scroll_threshold: f64,
    /// Anchor scrolling lands this many px above the target.
    pub anchor_offset: f64,
    /// Carousel advance per frame, in px.
    pub carousel_speed: f64,
    pub reveal_groups: Vec<RevealGroupConfig>,
    /// Visible fraction that counts as intersecting.
    pub reveal_threshold: f64,
    /// `tracing` level filter for the web host (`error` .. `trace`).
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            scroll_threshold: 50.0,
            anchor_offset: 100.0,
            carousel_speed: 0.5,
            reveal_groups: vec![
                RevealGroupConfig::new("section", 0),
                RevealGroupConfig::new(".category", 100),
                RevealGroupConfig::new(".skill .software-item, .software-item", 50),
            ],
            reveal_threshold: 0.1,
            log_level: "info".into(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON override. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the components cannot work with.
    pub fn validate(&self) -> Result<()> {
        let finite_non_negative = [
            ("scroll_threshold", self.scroll_threshold),
            ("anchor_offset", self.anchor_offset),
            ("carousel_speed", self.carousel_speed),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FolioError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FolioError::InvalidConfig(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if let Some(group) = self
            .reveal_groups
            .iter()
            .find(|group| group.selector.trim().is_empty())
        {
            return Err(FolioError::InvalidConfig(format!(
                "reveal group selector is empty (stagger {})",
                group.stagger_ms
            )));
        }
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(FolioError::InvalidConfig(format!(
                "log_level must be one of {LEVELS:?}, got `{}`",
                self.log_level
            )));
        }
        let s = &self.selectors;
        let required = [
            ("header", &s.header),
            ("menu_toggle", &s.menu_toggle),
            ("nav_panel", &s.nav_panel),
            ("nav_links", &s.nav_links),
            ("anchor_links", &s.anchor_links),
            ("featured_grid", &s.featured_grid),
            ("featured_item", &s.featured_item),
            ("contact_form_id", &s.contact_form_id),
            ("testimonials", &s.testimonials),
        ];
        for (name, value) in required.into_iter().chain(
            s.contact_fields
                .iter()
                .map(|field| ("contact_fields", field)),
        ) {
            if value.trim().is_empty() {
                return Err(FolioError::InvalidConfig(format!(
                    "selector `{name}` is empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_reference_page() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll_threshold, 50.0);
        assert_eq!(config.anchor_offset, 100.0);
        assert_eq!(config.carousel_speed, 0.5);
        assert_eq!(
            config
                .reveal_groups
                .iter()
                .map(|g| g.stagger_ms)
                .collect::<Vec<_>>(),
            vec![0, 100, 50]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(
            r#"{"carousel_speed": 1.25, "selectors": {"header": ".top-bar"}}"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.carousel_speed, 1.25);
        assert_eq!(config.selectors.header, ".top-bar");
        assert_eq!(config.selectors.menu_toggle, ".menu-toggle");
        assert_eq!(config.reveal_groups.len(), 3);
    }

    #[test]
    fn reveal_groups_are_externally_supplied() {
        let config = SiteConfig::from_json(
            r#"{"reveal_groups": [{"selector": ".card", "stagger_ms": 25}, {"selector": "h2"}]}"#,
        )
        .expect("reveal groups should parse");
        assert_eq!(
            config.reveal_groups,
            vec![
                RevealGroupConfig::new(".card", 25),
                RevealGroupConfig::new("h2", 0)
            ]
        );
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = SiteConfig::from_json(r#"{"carousel_speed": -1}"#).unwrap_err();
        assert!(matches!(err, FolioError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let err = SiteConfig::from_json(r#"{"reveal_threshold": 1.5}"#).unwrap_err();
        assert!(err.to_string().contains("reveal_threshold"));
    }

    #[test]
    fn empty_selector_is_rejected() {
        let err = SiteConfig::from_json(r#"{"reveal_groups": [{"selector": "  "}]}"#).unwrap_err();
        assert!(matches!(err, FolioError::InvalidConfig(_)));
        let err = SiteConfig::from_json(r#"{"selectors": {"nav_panel": ""}}"#).unwrap_err();
        assert!(err.to_string().contains("nav_panel"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = SiteConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(err.to_string().contains("log_level"));
        assert!(SiteConfig::from_json(r#"{"log_level": "DEBUG"}"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FolioError::ConfigParse(_)));
    }
}

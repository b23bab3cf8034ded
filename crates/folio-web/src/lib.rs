#![forbid(unsafe_code)]

//! Browser host for the folio portfolio page.
//!
//! [`boot`] (wasm32 only) installs every `folio-core` component against the
//! live DOM, wires the subscriptions they publish, and runs the host commands
//! they return: smooth window scrolls, staggered `IntersectionObserver`
//! registration and the `requestAnimationFrame` loop.
//!
//! The helpers in this file are target-independent so they can be tested
//! natively.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomDocument, DomNode};
#[cfg(target_arch = "wasm32")]
pub use wasm::{boot, snapshot};

use folio_core::{PortfolioSnapshot, Result, SiteConfig};

/// Parse a computed CSS length such as `"12.5px"`. Anything that is not a
/// pixel length (`auto`, empty, percentages) reads as 0.
#[must_use]
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|number| number.trim().parse::<f64>().ok())
        .filter(|px| px.is_finite())
        .unwrap_or(0.0)
}

/// Resolve the configuration passed to `boot`. `None` or blank input means
/// defaults.
pub fn load_config(json: Option<&str>) -> Result<SiteConfig> {
    match json.map(str::trim) {
        None | Some("") => Ok(SiteConfig::default()),
        Some(json) => SiteConfig::from_json(json),
    }
}

/// Diagnostic JSON for the JS `snapshot()` export.
pub fn snapshot_json(snapshot: &PortfolioSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FolioError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_px_reads_pixel_lengths() {
        assert_eq!(parse_px("12px"), 12.0);
        assert_eq!(parse_px(" 7.5px "), 7.5);
        assert_eq!(parse_px("-4px"), -4.0);
    }

    #[test]
    fn parse_px_treats_other_values_as_zero() {
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
        assert_eq!(parse_px("10%"), 0.0);
        assert_eq!(parse_px("px"), 0.0);
    }

    #[test]
    fn blank_config_uses_defaults() {
        assert_eq!(load_config(None).expect("default"), SiteConfig::default());
        assert_eq!(load_config(Some("  ")).expect("default"), SiteConfig::default());
    }

    #[test]
    fn config_override_is_validated() {
        let config = load_config(Some(r#"{"anchor_offset": 64}"#)).expect("override");
        assert_eq!(config.anchor_offset, 64.0);
        let err = load_config(Some(r#"{"anchor_offset": -1}"#)).unwrap_err();
        assert!(matches!(err, FolioError::InvalidConfig(_)));
    }

    #[test]
    fn snapshot_serializes_to_flat_json() {
        let snapshot = PortfolioSnapshot {
            header_bound: true,
            nav_open: false,
            featured_active: Some(2),
            featured_items: 4,
            carousel_offset: Some(12.5),
            carousel_paused: Some(false),
            contact_bound: true,
            reveal: Vec::new(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&snapshot_json(&snapshot).expect("serialize")).expect("parse");
        assert_eq!(json["featured_active"], 2);
        assert_eq!(json["carousel_offset"], 12.5);
        assert_eq!(json["reveal"], serde_json::json!([]));
    }
}

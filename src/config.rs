//! Tuning constants for verse tracking and the scrollbar.
//!
//! The pixel values here are hand-tuned; they were carried over from the
//! shipped reader rather than derived. They are centralized in one
//! TOML-loadable struct so a build can override them without touching the
//! math, and any missing or invalid entries fall back to the shipped values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Positional tuning; deserializable from TOML.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScrollTuning {
    /// Fraction of the viewport height below the top edge where the
    /// "current verse" reference line sits. A verse becomes current once it
    /// crosses this line, not the instant it scrolls into view.
    #[serde(default = "default_current_verse_fraction")]
    pub current_verse_fraction: f32,
    /// Tolerance around the content extremes within which the current
    /// position reports the top/bottom sentinel instead of a verse.
    #[serde(default = "default_edge_tolerance_px")]
    pub edge_tolerance_px: f32,
    /// Overscroll distance past either content edge that arms a chapter
    /// change on release.
    #[serde(default = "default_overscroll_release_px")]
    pub overscroll_release_px: f32,
    /// Content-height to viewport-height ratio at or below which the
    /// scrollbar is not shown.
    #[serde(default = "default_min_scroll_ratio")]
    pub min_scroll_ratio: f32,
}

impl ScrollTuning {
    /// Reference line position in pixels for a given viewport height.
    pub fn reference_line_px(&self, viewport_height: f32) -> f32 {
        viewport_height * self.current_verse_fraction
    }
}

impl Default for ScrollTuning {
    fn default() -> Self {
        ScrollTuning {
            current_verse_fraction: default_current_verse_fraction(),
            edge_tolerance_px: default_edge_tolerance_px(),
            overscroll_release_px: default_overscroll_release_px(),
            min_scroll_ratio: default_min_scroll_ratio(),
        }
    }
}

/// Load tuning values from a TOML file, falling back to the defaults if the
/// file is missing or malformed.
pub fn load_tuning(path: &Path) -> ScrollTuning {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded scroll tuning");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default scroll tuning: {err}"
            );
            return ScrollTuning::default();
        }
    };

    match parse_tuning(&contents) {
        Ok(tuning) => {
            debug!("Parsed scroll tuning from disk");
            tuning
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid tuning TOML: {err}");
            ScrollTuning::default()
        }
    }
}

/// Parse tuning values from a TOML string.
pub fn parse_tuning(contents: &str) -> Result<ScrollTuning> {
    toml::from_str::<ScrollTuning>(contents).context("Failed to parse scroll tuning")
}

fn default_current_verse_fraction() -> f32 {
    1.0 / 3.0
}

fn default_edge_tolerance_px() -> f32 {
    50.0
}

fn default_overscroll_release_px() -> f32 {
    75.0
}

fn default_min_scroll_ratio() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let tuning = parse_tuning("edge_tolerance_px = 40.0").expect("partial tuning parses");
        assert_eq!(tuning.edge_tolerance_px, 40.0);
        assert_eq!(tuning.overscroll_release_px, default_overscroll_release_px());
        assert_eq!(
            tuning.current_verse_fraction,
            default_current_verse_fraction()
        );
    }

    #[test]
    fn empty_input_yields_defaults() {
        let tuning = parse_tuning("").expect("empty tuning parses");
        assert_eq!(
            tuning.edge_tolerance_px,
            ScrollTuning::default().edge_tolerance_px
        );
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(parse_tuning("edge_tolerance_px = \"tall\"").is_err());
    }

    #[test]
    fn reference_line_scales_with_viewport() {
        let tuning = ScrollTuning::default();
        assert!((tuning.reference_line_px(900.0) - 300.0).abs() < 1e-3);
    }
}

//! Engine configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Configuration for the placement engine
///
/// These values have been tuned against typical residential plot sizes.
/// Canvas coordinates are in the same unit as plant diameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === CANVAS ===
    /// Canvas width (world units)
    ///
    /// Bounds are explicit engine state, never ambient: `finalize` clamps
    /// positions into them and the suggestion search scans within them.
    pub canvas_width: f32,

    /// Canvas height (world units)
    pub canvas_height: f32,

    // === SEPARATION ===
    /// Minimum clear gap enforced between plant edges (world units)
    ///
    /// The shift resolver pushes a neighbor away when the center distance
    /// drops below `(a.size + b.size) / 2 + min_gap`. Larger values give
    /// airier layouts; 0 allows plants to touch but not overlap.
    pub min_gap: f32,

    // === GRID ===
    /// Spacing of the snap grid (world units)
    ///
    /// Used both for snapping finalized positions and, independently, as
    /// nothing else; the suggestion search has its own step.
    pub grid_size: f32,

    /// Whether finalized positions snap to the grid
    ///
    /// Snapping happens after bounds clamping, so a snapped coordinate can
    /// sit up to half a grid cell outside the clamp range.
    pub snap_to_grid: bool,

    // === PLANTS ===
    /// Diameter assigned to a plant whose spec declares no positive size
    pub default_plant_size: f32,

    // === SUGGESTION SEARCH ===
    /// Step between sampled cells in the location-suggestion search
    ///
    /// Cost of a search is proportional to
    /// `(canvas_width / search_step) * (canvas_height / search_step)`
    /// provider calls, so fine steps on large canvases get slow.
    pub search_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            min_gap: 40.0,
            grid_size: 20.0,
            snap_to_grid: false,
            default_plant_size: 30.0,
            search_step: 20.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; absent keys keep their defaults
    pub fn from_toml_str(text: &str) -> crate::core::error::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config
            .validate()
            .map_err(crate::core::error::VerdantError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(format!(
                "canvas dimensions must be positive (got {}x{})",
                self.canvas_width, self.canvas_height
            ));
        }

        if self.min_gap < 0.0 {
            return Err(format!("min_gap ({}) must not be negative", self.min_gap));
        }

        if self.grid_size <= 0.0 {
            return Err(format!("grid_size ({}) must be positive", self.grid_size));
        }

        if self.default_plant_size <= 0.0 {
            return Err(format!(
                "default_plant_size ({}) must be positive",
                self.default_plant_size
            ));
        }

        if self.search_step <= 0.0 {
            return Err(format!(
                "search_step ({}) must be positive",
                self.search_step
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_gap_rejected() {
        let config = EngineConfig {
            min_gap: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let config = EngineConfig {
            canvas_width: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = EngineConfig::from_toml_str(
            "canvas_width = 400.0\ncanvas_height = 400.0\nsnap_to_grid = true\n",
        )
        .unwrap();
        assert_eq!(config.canvas_width, 400.0);
        assert!(config.snap_to_grid);
        // untouched keys keep defaults
        assert_eq!(config.min_gap, 40.0);
    }

    #[test]
    fn test_toml_invalid_values_rejected() {
        let result = EngineConfig::from_toml_str("grid_size = 0.0\n");
        assert!(result.is_err());
    }
}

//! Editor configuration.

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::snap::SnapConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the interaction engine. Every field has a default, so a
/// partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo steps kept before the oldest is dropped.
    pub history_capacity: usize,
    pub snap: SnapConfig,
    /// Douglas–Peucker tolerance applied to freehand paths on release.
    pub simplify_epsilon: f64,
    /// Minimum world distance between consecutive freehand samples.
    pub freehand_min_sample_distance: f64,
    /// Smallest extent a drawn shape may have; below this the draw is cancelled.
    pub min_draw_size: f64,
    /// Smallest dimension a scaled shape may shrink to.
    pub min_scale_dimension: f64,
    /// Minimum stroke hit tolerance in world units.
    pub hit_tolerance: f64,
    /// Offset applied to duplicated shapes.
    pub duplicate_offset: f64,
    /// Quiet period before a pan/zoom run is committed.
    pub squash_debounce_ms: u64,
    /// Selection handle hit radius in screen pixels.
    pub handle_tolerance_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            snap: SnapConfig::default(),
            simplify_epsilon: 1.2,
            freehand_min_sample_distance: 2.0,
            min_draw_size: 2.0,
            min_scale_dimension: 1.0,
            hit_tolerance: 4.0,
            duplicate_offset: 10.0,
            squash_debounce_ms: 120,
            handle_tolerance_px: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a non-negative number, got {value}"),
                })
            }
        }

        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "historyCapacity",
                reason: "must be at least 1".to_string(),
            });
        }
        non_negative("snap.gridSize", self.snap.grid_size)?;
        non_negative("snap.tolerancePx", self.snap.tolerance_px)?;
        non_negative("snap.angleStepDeg", self.snap.angle_step_deg)?;
        non_negative("simplifyEpsilon", self.simplify_epsilon)?;
        non_negative("freehandMinSampleDistance", self.freehand_min_sample_distance)?;
        non_negative("minDrawSize", self.min_draw_size)?;
        non_negative("minScaleDimension", self.min_scale_dimension)?;
        non_negative("hitTolerance", self.hit_tolerance)?;
        non_negative("duplicateOffset", self.duplicate_offset)?;
        non_negative("handleTolerancePx", self.handle_tolerance_px)?;
        Ok(())
    }

    /// Squash debounce window as a duration.
    pub fn squash_debounce(&self) -> Duration {
        Duration::from_millis(self.squash_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 100);
        assert!((config.simplify_epsilon - 1.2).abs() < f64::EPSILON);
        assert!((config.snap.grid_size - 20.0).abs() < f64::EPSILON);
        assert!((config.snap.angle_step_deg - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.squash_debounce(), Duration::from_millis(120));
    }

    #[test]
    fn test_partial_json() {
        let config =
            EditorConfig::from_json(r#"{"historyCapacity": 5, "snap": {"gridSize": 10.0}}"#).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert!((config.snap.grid_size - 10.0).abs() < f64::EPSILON);
        assert!(config.snap.enabled);
        assert!((config.min_draw_size - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"historyCapacity": 0}"#),
            Err(ConfigError::Invalid { field: "historyCapacity", .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"simplifyEpsilon": -1.0}"#),
            Err(ConfigError::Invalid { field: "simplifyEpsilon", .. })
        ));
        assert!(matches!(
            EditorConfig::from_json("not json"),
            Err(ConfigError::Serialization(_))
        ));
    }
}

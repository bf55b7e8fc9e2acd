//! Ray construction settings.

use raymesh_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::{RayError, Result};

/// Parameters shared by the ray factory and the segment clipper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaySettings {
    /// Directions at or below this length are rejected as degenerate.
    pub zero_length: f64,
    /// Half-extent of the cube `[-bound, bound]^3` that visualization
    /// segments are clipped to.
    pub bound: f64,
}

impl Default for RaySettings {
    fn default() -> Self {
        Self {
            zero_length: Tolerance::DEFAULT.zero_length,
            bound: 100.0,
        }
    }
}

impl RaySettings {
    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| RayError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.zero_length.is_finite() && self.zero_length >= 0.0) {
            return Err(RayError::InvalidSettings(
                "zero_length must be a non-negative finite number".into(),
            ));
        }
        if !(self.bound.is_finite() && self.bound > 0.0) {
            return Err(RayError::InvalidBound(self.bound));
        }
        Ok(())
    }

    /// Tolerance used for normalization.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.zero_length)
    }
}

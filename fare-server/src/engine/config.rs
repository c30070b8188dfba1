//! Engine configuration.

use crate::distance::DEFAULT_CORRECTION_FACTOR;
use crate::network::DEFAULT_COLOR;

/// Tunable parameters for the fare engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Multiplier from straight-line distance to estimated track distance.
    /// Deployments have used both 1.05 and 1.15.
    pub correction_factor: f64,

    /// Display color for stations that no line claims.
    pub default_color: String,
}

impl EngineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(correction_factor: f64, default_color: impl Into<String>) -> Self {
        Self {
            correction_factor,
            default_color: default_color.into(),
        }
    }

    /// Set the route-length correction factor.
    pub fn with_correction_factor(mut self, factor: f64) -> Self {
        self.correction_factor = factor;
        self
    }

    /// Set the fallback station color.
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            correction_factor: DEFAULT_CORRECTION_FACTOR,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}

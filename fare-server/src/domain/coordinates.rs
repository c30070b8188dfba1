//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// Error returned when coordinates are outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({longitude}, {latitude}): {reason}")]
pub struct InvalidCoordinates {
    longitude: f64,
    latitude: f64,
    reason: &'static str,
}

/// A point on the Earth's surface in decimal degrees.
///
/// Serialized as a `[longitude, latitude]` pair, which is the order the
/// station documents use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Create coordinates, checking that both values are finite and in range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        let invalid = |reason| InvalidCoordinates {
            longitude,
            latitude,
            reason,
        };

        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(invalid("must be finite"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }

        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl TryFrom<[f64; 2]> for Coordinates {
    type Error = InvalidCoordinates;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.longitude, c.latitude]
    }
}

//! Travel distance estimation.
//!
//! Rail routes are not straight lines, so the great-circle distance between
//! two stations is scaled by an empirically fitted correction factor to
//! approximate the length of track actually travelled.

use crate::domain::Coordinates;

/// Mean Earth radius used by the estimator, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default route-length correction factor.
pub const DEFAULT_CORRECTION_FACTOR: f64 = 1.15;

/// Error returned for an unusable correction factor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("correction factor must be finite and positive, got {0}")]
pub struct InvalidCorrectionFactor(pub f64);

/// Great-circle distance between two points in kilometres (haversine).
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlat = (to.latitude() - from.latitude()).to_radians();
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal points just past 1
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Estimates in-system travel distance between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEstimator {
    correction_factor: f64,
}

impl DistanceEstimator {
    /// Create an estimator with the given route-length correction factor.
    ///
    /// ```
    /// use fare_server::distance::DistanceEstimator;
    ///
    /// assert!(DistanceEstimator::new(1.05).is_ok());
    /// assert!(DistanceEstimator::new(0.0).is_err());
    /// ```
    pub fn new(correction_factor: f64) -> Result<Self, InvalidCorrectionFactor> {
        if !correction_factor.is_finite() || correction_factor <= 0.0 {
            return Err(InvalidCorrectionFactor(correction_factor));
        }
        Ok(Self { correction_factor })
    }

    pub fn correction_factor(&self) -> f64 {
        self.correction_factor
    }

    /// Estimated travel distance in kilometres.
    ///
    /// Identical coordinates give exactly zero.
    pub fn estimate_km(&self, from: Coordinates, to: Coordinates) -> f64 {
        haversine_km(from, to) * self.correction_factor
    }
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self {
            correction_factor: DEFAULT_CORRECTION_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lon: f64, lat: f64) -> Coordinates {
        Coordinates::new(lon, lat).unwrap()
    }

    #[test]
    fn identical_points_are_zero() {
        let p = coords(103.8198, 1.3521);
        assert_eq!(haversine_km(p, p), 0.0);
        assert_eq!(DistanceEstimator::default().estimate_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2 * pi * 6371 / 360
        let d = haversine_km(coords(0.0, 0.0), coords(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.001, "got {d}");
    }

    #[test]
    fn jurong_east_to_city_hall() {
        let jurong_east = coords(103.7423, 1.3331);
        let city_hall = coords(103.8521, 1.2930);

        let direct = haversine_km(jurong_east, city_hall);
        assert!((12.5..13.5).contains(&direct), "got {direct}");

        let estimator = DistanceEstimator::new(1.15).unwrap();
        let estimated = estimator.estimate_km(jurong_east, city_hall);
        assert!((estimated - direct * 1.15).abs() < 1e-9);
    }

    #[test]
    fn correction_factor_scales_linearly() {
        let a = coords(103.7423, 1.3331);
        let b = coords(103.9464, 1.3272);

        let low = DistanceEstimator::new(1.05).unwrap().estimate_km(a, b);
        let high = DistanceEstimator::new(1.15).unwrap().estimate_km(a, b);
        assert!((high / low - 1.15 / 1.05).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_correction_factor() {
        assert_eq!(
            DistanceEstimator::new(-1.0),
            Err(InvalidCorrectionFactor(-1.0))
        );
        assert!(DistanceEstimator::new(0.0).is_err());
        assert!(DistanceEstimator::new(f64::NAN).is_err());
        assert!(DistanceEstimator::new(f64::INFINITY).is_err());
    }

    #[test]
    fn default_factor() {
        assert_eq!(
            DistanceEstimator::default().correction_factor(),
            DEFAULT_CORRECTION_FACTOR
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = Coordinates> {
        (-180.0f64..=180.0, -90.0f64..=90.0)
            .prop_map(|(lon, lat)| Coordinates::new(lon, lat).unwrap())
    }

    proptest! {
        /// distance(A, B) == distance(B, A)
        #[test]
        fn symmetric(a in point(), b in point(), factor in 0.5f64..2.0) {
            let estimator = DistanceEstimator::new(factor).unwrap();
            let ab = estimator.estimate_km(a, b);
            let ba = estimator.estimate_km(b, a);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }

        /// distance(A, A) == 0
        #[test]
        fn zero_to_self(a in point(), factor in 0.5f64..2.0) {
            let estimator = DistanceEstimator::new(factor).unwrap();
            prop_assert_eq!(estimator.estimate_km(a, a), 0.0);
        }

        /// Never negative and never more than half the circumference
        #[test]
        fn bounded(a in point(), b in point()) {
            let d = haversine_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}

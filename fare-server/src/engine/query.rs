//! Fare queries over the loaded network.

use serde::Serialize;
use tracing::debug;

use crate::distance::{DistanceEstimator, InvalidCorrectionFactor};
use crate::domain::{FareConfig, FareError};
use crate::fares::{FareSchema, FareTable};
use crate::network::{Line, Registry, Station};

use super::config::EngineConfig;

/// A computed fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareResult {
    distance_km: f64,
    fare: f64,
}

impl FareResult {
    /// Estimated travel distance in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Fare in currency units, exactly as listed in the fare table.
    pub fn fare(&self) -> f64 {
        self.fare
    }

    /// Distance rounded to 0.1 km, e.g. `"12.3"`.
    pub fn distance_display(&self) -> String {
        format!("{:.1}", self.distance_km)
    }

    /// Fare with two decimal places, e.g. `"1.41"`.
    pub fn fare_display(&self) -> String {
        format!("{:.2}", self.fare)
    }
}

/// Outcome of a fare query where the selection may be incomplete.
#[derive(Debug, Clone, PartialEq)]
pub enum FareQuote {
    /// One or both stations have not been chosen yet.
    Incomplete,

    /// Both stations were given but no fare could be computed.
    Unavailable(FareError),

    /// The fare was computed.
    Priced(FareResult),
}

/// The fare engine.
#[derive(Debug, Clone)]
pub struct FareEngine {
    registry: Registry,
    fares: FareTable,
    estimator: DistanceEstimator,
}

impl FareEngine {
    /// Create an engine over loaded data.
    ///
    /// Fails only if the configured correction factor is unusable.
    pub fn new(
        registry: Registry,
        fares: FareTable,
        config: &EngineConfig,
    ) -> Result<Self, InvalidCorrectionFactor> {
        let estimator = DistanceEstimator::new(config.correction_factor)?;
        let registry = registry.with_default_color(config.default_color.clone());

        Ok(Self {
            registry,
            fares,
            estimator,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    pub fn estimator(&self) -> &DistanceEstimator {
        &self.estimator
    }

    /// Whether the loaded fare table has a time-band dimension.
    pub fn schema(&self) -> FareSchema {
        self.fares.schema()
    }

    /// Look up a station by code.
    pub fn station(&self, code: &str) -> Option<&Station> {
        self.registry.station(code)
    }

    /// All lines, in load order.
    pub fn lines(&self) -> &[Line] {
        self.registry.lines()
    }

    /// Stations on a line. `None`, `"all"` and unknown lines return every station.
    pub fn stations_on_line(&self, line: Option<&str>) -> Vec<&Station> {
        self.registry.stations_on_line(line)
    }

    /// Display color for a station.
    pub fn color_for_station(&self, station: &Station) -> &str {
        self.registry.color_for_station(station)
    }

    /// Estimated travel distance between two stations in kilometres.
    pub fn distance_between(&self, from: &Station, to: &Station) -> f64 {
        self.estimator.estimate_km(from.coordinates, to.coordinates)
    }

    /// Compute the distance and fare between two stations.
    pub fn compute_fare(
        &self,
        start: &str,
        end: &str,
        config: &FareConfig,
    ) -> Result<FareResult, FareError> {
        let from = self
            .station(start)
            .ok_or_else(|| FareError::UnknownStation(start.to_string()))?;
        let to = self
            .station(end)
            .ok_or_else(|| FareError::UnknownStation(end.to_string()))?;

        let distance_km = self.distance_between(from, to);
        let fare = self.fares.resolve(distance_km, config)?;

        debug!(
            from = %from.code,
            to = %to.code,
            config = %config,
            distance_km,
            fare,
            "computed fare"
        );

        Ok(FareResult { distance_km, fare })
    }

    /// Like [`compute_fare`](Self::compute_fare), but tolerates a selection
    /// that is not complete yet.
    pub fn quote(&self, start: Option<&str>, end: Option<&str>, config: &FareConfig) -> FareQuote {
        let (Some(start), Some(end)) = (start, end) else {
            return FareQuote::Incomplete;
        };

        match self.compute_fare(start, end, config) {
            Ok(result) => FareQuote::Priced(result),
            Err(e) => FareQuote::Unavailable(e),
        }
    }
}

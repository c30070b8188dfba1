//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{FareConfig, PassengerCategory, PaymentMethod, TimeBand};
use crate::engine::{FareEngine, FareResult};
use crate::network::{Line, Station};

/// Query for the station list.
#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    /// Line to filter by; `all` or absent lists every station
    pub line: Option<String>,
}

/// Request to price a journey.
#[derive(Debug, Default, Deserialize)]
pub struct FareRequest {
    /// Origin station code
    pub from: Option<String>,

    /// Destination station code
    pub to: Option<String>,

    /// Passenger category (defaults to adult)
    pub category: Option<String>,

    /// Payment method (defaults to card)
    pub payment: Option<String>,

    /// Time band (defaults to the band at the time of the request)
    pub time_band: Option<String>,
}

/// A line in the lines listing.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub name: String,
    pub color: String,

    /// Station codes in line order
    pub stations: Vec<String>,
}

/// Response listing lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// A station with its display color.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station code (e.g., "NS1")
    pub code: String,

    /// Station name
    pub name: String,

    /// "Name (CODE)"
    pub label: String,

    /// Line code the station is filed under
    pub line: String,

    pub longitude: f64,
    pub latitude: f64,

    /// Display color of the station's line
    pub color: String,
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Response for a fare request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FareResponse {
    /// A station has not been chosen yet
    Incomplete,

    /// The journey was priced
    Priced {
        from: StationResult,
        to: StationResult,
        category: PassengerCategory,
        payment: PaymentMethod,

        /// Band the fare was read from; absent for tables without bands
        time_band: Option<TimeBand>,

        distance_km: f64,
        fare: f64,

        /// Distance rounded to 0.1 km
        distance_display: String,

        /// Fare with two decimal places
        fare_display: String,
    },
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LineResult {
    /// Create from a domain Line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            name: line.name.clone(),
            color: line.color.clone(),
            stations: line.stations.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl StationResult {
    /// Create from a domain Station, resolving its color through the engine.
    pub fn from_station(station: &Station, engine: &FareEngine) -> Self {
        Self {
            code: station.code.to_string(),
            name: station.name.clone(),
            label: station.label(),
            line: station.line_code.clone(),
            longitude: station.coordinates.longitude(),
            latitude: station.coordinates.latitude(),
            color: engine.color_for_station(station).to_string(),
        }
    }
}

impl FareResponse {
    /// Create a priced response.
    ///
    /// `config` should be the configuration the table actually used.
    pub fn priced(
        from: StationResult,
        to: StationResult,
        config: FareConfig,
        result: FareResult,
    ) -> Self {
        Self::Priced {
            from,
            to,
            category: config.category,
            payment: config.payment,
            time_band: config.time_band,
            distance_km: result.distance_km(),
            fare: result.fare(),
            distance_display: result.distance_display(),
            fare_display: result.fare_display(),
        }
    }
}

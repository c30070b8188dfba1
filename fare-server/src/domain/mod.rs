//! Domain types for the fare estimator.
//!
//! This module contains the validated value types shared by the registry,
//! the fare tables and the query engine. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod coordinates;
mod error;
mod fare_config;
mod station_code;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use error::{FareError, IntegrityWarning};
pub use fare_config::{
    FareConfig, InvalidFareOption, NETWORK_UTC_OFFSET_SECS, PassengerCategory, PaymentMethod, TimeBand,
};
pub use station_code::{InvalidStationCode, StationCode};

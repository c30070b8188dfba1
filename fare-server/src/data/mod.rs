//! Loading of station, line and fare documents.
//!
//! The three documents are fetched once at startup, either from a local
//! directory or from a base URL, decoded, checked for referential
//! integrity and turned into a [`Registry`](crate::network::Registry) and a
//! [`FareTable`](crate::fares::FareTable). Problems the engine can work
//! around are reported as warnings; anything else fails the load.

mod client;
mod convert;
mod dto;
mod error;

pub use client::{DataClient, DataClientConfig, DataSource};
pub use convert::{NetworkData, build_network, decode_fares, decode_lines, decode_stations};
pub use dto::{Document, LineDto, StationDto};
pub use error::DataError;

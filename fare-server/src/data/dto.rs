//! Document shapes for station and line data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The documents that make up a network data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Stations,
    Lines,
    Fares,
}

impl Document {
    pub const ALL: [Document; 3] = [Self::Stations, Self::Lines, Self::Fares];

    /// File name of the document, relative to the data directory or base URL.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Stations => "mrt_stations.json",
            Self::Lines => "mrt_lines.json",
            Self::Fares => "lta_fare_data.json",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A station record as it appears in the stations document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationDto {
    pub name: String,
    pub code: String,
    /// Declared line code; the code prefix is used when absent.
    #[serde(default)]
    pub line: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// A line record as it appears in the lines document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineDto {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub stations: Vec<String>,
}

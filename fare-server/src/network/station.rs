//! Station and line records.

use serde::Serialize;

use crate::domain::{Coordinates, StationCode};

/// A station in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub code: StationCode,
    /// Line code this station is filed under. Defaults to the code prefix.
    pub line_code: String,
    pub coordinates: Coordinates,
}

impl Station {
    /// Create a station whose line code is its code prefix.
    pub fn new(name: impl Into<String>, code: StationCode, coordinates: Coordinates) -> Self {
        let line_code = code.line_code().to_string();
        Self {
            name: name.into(),
            code,
            line_code,
            coordinates,
        }
    }

    /// Override the line code with the one declared in the station document.
    pub fn with_line_code(mut self, line_code: impl Into<String>) -> Self {
        self.line_code = line_code.into();
        self
    }

    /// `"Name (CODE)"`, as shown in station pickers.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// A rail line: a display color and an ordered list of station codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Line identifier, usually equal to the station code prefix.
    pub name: String,
    pub color: String,
    pub stations: Vec<StationCode>,
}

impl Line {
    pub fn new(name: impl Into<String>, color: impl Into<String>, stations: Vec<StationCode>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            stations,
        }
    }

    /// Whether the line's station list contains `code`.
    pub fn contains(&self, code: &StationCode) -> bool {
        self.stations.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn line_code_defaults_to_prefix() {
        let station = Station::new(
            "Jurong East",
            code("NS1"),
            Coordinates::new(103.7423, 1.3331).unwrap(),
        );
        assert_eq!(station.line_code, "NS");

        let station = station.with_line_code("EW");
        assert_eq!(station.line_code, "EW");
    }

    #[test]
    fn label_includes_code() {
        let station = Station::new(
            "Dhoby Ghaut",
            code("NS24"),
            Coordinates::new(103.8455, 1.2990).unwrap(),
        );
        assert_eq!(station.label(), "Dhoby Ghaut (NS24)");
    }

    #[test]
    fn line_contains() {
        let line = Line::new("CC", "#fa9e0d", vec![code("NS24"), code("CC4")]);
        assert!(line.contains(&code("NS24")));
        assert!(!line.contains(&code("CC15")));
    }
}

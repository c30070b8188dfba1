//! Immutable station/line registry.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{IntegrityWarning, StationCode};

use super::station::{Line, Station};

/// Line filter value meaning "no filter".
pub const ALL_LINES: &str = "all";

/// Color used for stations that no line claims.
pub const DEFAULT_COLOR: &str = "#888888";

/// The loaded stations and lines.
///
/// Built once from already-decoded data and never mutated afterwards, so it
/// can be shared between threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Stations in load order, first occurrence of each code only.
    stations: Vec<Station>,

    /// Lines in load order. Interchange resolution picks the first match.
    lines: Vec<Line>,

    /// Station code to index into `stations`.
    by_code: HashMap<StationCode, usize>,

    /// Station code to indices into `lines` that list it, ascending.
    memberships: HashMap<StationCode, Vec<usize>>,

    default_color: String,

    warnings: Vec<IntegrityWarning>,
}

impl Registry {
    /// Build a registry, recording any integrity problems as warnings.
    ///
    /// Duplicate station codes keep their first entry. Line entries that
    /// reference unknown stations are kept but never match a station.
    pub fn new(stations: Vec<Station>, lines: Vec<Line>) -> Self {
        let mut warnings = Vec::new();
        let mut unique = Vec::with_capacity(stations.len());
        let mut by_code = HashMap::with_capacity(stations.len());

        for station in stations {
            if by_code.contains_key(&station.code) {
                warnings.push(IntegrityWarning::DuplicateStation {
                    code: station.code.to_string(),
                });
                continue;
            }
            by_code.insert(station.code.clone(), unique.len());
            unique.push(station);
        }

        let mut memberships: HashMap<StationCode, Vec<usize>> = HashMap::new();
        for (line_idx, line) in lines.iter().enumerate() {
            for code in &line.stations {
                if !by_code.contains_key(code) {
                    warnings.push(IntegrityWarning::UnknownLineStation {
                        line: line.name.clone(),
                        code: code.to_string(),
                    });
                    continue;
                }
                let entry = memberships.entry(code.clone()).or_default();
                if entry.last() != Some(&line_idx) {
                    entry.push(line_idx);
                }
            }
        }

        for station in &unique {
            if !memberships.contains_key(&station.code) {
                warnings.push(IntegrityWarning::UnlinedStation {
                    code: station.code.to_string(),
                });
            }
        }

        debug!(
            stations = unique.len(),
            lines = lines.len(),
            warnings = warnings.len(),
            "built station registry"
        );

        Self {
            stations: unique,
            lines,
            by_code,
            memberships,
            default_color: DEFAULT_COLOR.to_string(),
            warnings,
        }
    }

    /// Use a different color for stations that no line claims.
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// All stations, in load order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// All lines, in load order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Look up a station by its exact code.
    pub fn station(&self, code: &str) -> Option<&Station> {
        self.by_code.get(code).map(|&idx| &self.stations[idx])
    }

    /// Look up a line by name.
    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.name == name)
    }

    /// Stations on a line, in station load order.
    ///
    /// `None`, `"all"` and unknown line names all return every station.
    pub fn stations_on_line(&self, line: Option<&str>) -> Vec<&Station> {
        let line = line.filter(|l| *l != ALL_LINES).and_then(|l| self.line(l));

        match line {
            Some(line) => self
                .stations
                .iter()
                .filter(|s| line.contains(&s.code))
                .collect(),
            None => self.stations.iter().collect(),
        }
    }

    /// Every line whose station list contains this station, in line order.
    pub fn lines_for_station(&self, station: &Station) -> Vec<&Line> {
        self.memberships
            .get(&station.code)
            .map(|idxs| idxs.iter().map(|&i| &self.lines[i]).collect())
            .unwrap_or_default()
    }

    /// The line used to display a station.
    ///
    /// This is the first line (in load order) that lists the station. If no
    /// line lists it, falls back to the line named by the station's line
    /// code.
    pub fn line_for_station(&self, station: &Station) -> Option<&Line> {
        self.memberships
            .get(&station.code)
            .and_then(|idxs| idxs.first())
            .map(|&i| &self.lines[i])
            .or_else(|| self.line(&station.line_code))
    }

    /// Display color for a station, or the default color if no line claims it.
    pub fn color_for_station(&self, station: &Station) -> &str {
        self.line_for_station(station)
            .map(|l| l.color.as_str())
            .unwrap_or(self.default_color.as_str())
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Problems found while building the registry.
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn station(c: &str, name: &str, lon: f64, lat: f64) -> Station {
        Station::new(name, code(c), Coordinates::new(lon, lat).unwrap())
    }

    fn line(name: &str, color: &str, codes: &[&str]) -> Line {
        Line::new(name, color, codes.iter().map(|c| code(c)).collect())
    }

    fn registry() -> Registry {
        let stations = vec![
            station("NS1", "Jurong East", 103.7423, 1.3331),
            station("NS24", "Dhoby Ghaut", 103.8455, 1.2990),
            station("NS25", "City Hall", 103.8521, 1.2930),
            station("EW12", "Bugis", 103.8559, 1.3006),
            station("CC4", "Promenade", 103.8603, 1.2937),
        ];
        let lines = vec![
            line("NS", "#d42e12", &["NS1", "NS24", "NS25"]),
            line("EW", "#009645", &["EW12", "NS25", "NS1"]),
            line("CC", "#fa9e0d", &["NS24", "CC4"]),
        ];
        Registry::new(stations, lines)
    }

    fn codes(stations: &[&Station]) -> Vec<String> {
        stations.iter().map(|s| s.code.to_string()).collect()
    }

    #[test]
    fn all_lines_returns_everything_in_load_order() {
        let reg = registry();
        let expected = vec!["NS1", "NS24", "NS25", "EW12", "CC4"];

        assert_eq!(codes(&reg.stations_on_line(None)), expected);
        assert_eq!(codes(&reg.stations_on_line(Some("all"))), expected);
    }

    #[test]
    fn unknown_line_returns_everything() {
        let reg = registry();
        assert_eq!(reg.stations_on_line(Some("TE")).len(), 5);
    }

    #[test]
    fn line_filter_uses_list_containment() {
        let reg = registry();

        // EW lists interchange stations with NS codes; order follows station load order
        assert_eq!(
            codes(&reg.stations_on_line(Some("EW"))),
            vec!["NS1", "NS25", "EW12"]
        );
        assert_eq!(codes(&reg.stations_on_line(Some("CC"))), vec!["NS24", "CC4"]);
    }

    #[test]
    fn station_lookup() {
        let reg = registry();
        assert_eq!(reg.station("NS24").unwrap().name, "Dhoby Ghaut");
        assert!(reg.station("NS99").is_none());
        assert!(reg.station("ns24").is_none());
    }

    #[test]
    fn interchange_color_is_first_listing_line() {
        let reg = registry();
        let city_hall = reg.station("NS25").unwrap();

        for _ in 0..10 {
            assert_eq!(reg.color_for_station(city_hall), "#d42e12");
        }

        let lines: Vec<_> = reg
            .lines_for_station(city_hall)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(lines, vec!["NS", "EW"]);
    }

    #[test]
    fn color_follows_membership_not_prefix() {
        let reg = registry();
        let bugis = reg.station("EW12").unwrap();
        assert_eq!(reg.color_for_station(bugis), "#009645");

        let promenade = reg.station("CC4").unwrap();
        assert_eq!(reg.color_for_station(promenade), "#fa9e0d");
    }

    #[test]
    fn unlisted_station_falls_back_to_prefix_line_then_default() {
        let stations = vec![
            station("NS4", "Choa Chu Kang", 103.7444, 1.3854),
            station("TE1", "Woodlands North", 103.7856, 1.4482),
        ];
        let lines = vec![line("NS", "#d42e12", &[])];
        let reg = Registry::new(stations, lines);

        let cck = reg.station("NS4").unwrap();
        assert_eq!(reg.color_for_station(cck), "#d42e12");

        let wdn = reg.station("TE1").unwrap();
        assert_eq!(reg.color_for_station(wdn), DEFAULT_COLOR);
        assert!(reg.line_for_station(wdn).is_none());
    }

    #[test]
    fn custom_default_color() {
        let stations = vec![station("TE1", "Woodlands North", 103.7856, 1.4482)];
        let reg = Registry::new(stations, vec![]).with_default_color("grey");
        let wdn = reg.station("TE1").unwrap();
        assert_eq!(reg.color_for_station(wdn), "grey");
    }

    #[test]
    fn warnings_for_inconsistent_data() {
        let stations = vec![
            station("NS1", "Jurong East", 103.7423, 1.3331),
            station("NS1", "Jurong East (again)", 103.7423, 1.3331),
            station("TE1", "Woodlands North", 103.7856, 1.4482),
        ];
        let lines = vec![line("NS", "#d42e12", &["NS1", "NS99"])];
        let reg = Registry::new(stations, lines);

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.station("NS1").unwrap().name, "Jurong East");

        let warnings = reg.warnings();
        assert!(warnings.contains(&IntegrityWarning::DuplicateStation { code: "NS1".into() }));
        assert!(warnings.contains(&IntegrityWarning::UnknownLineStation {
            line: "NS".into(),
            code: "NS99".into()
        }));
        assert!(warnings.contains(&IntegrityWarning::UnlinedStation { code: "TE1".into() }));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn consistent_data_has_no_warnings() {
        assert!(registry().warnings().is_empty());
    }

    #[test]
    fn empty_registry() {
        let reg = Registry::new(vec![], vec![]);
        assert!(reg.is_empty());
        assert!(reg.stations_on_line(None).is_empty());
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}

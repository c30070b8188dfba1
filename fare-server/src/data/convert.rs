//! Conversion from raw documents to registry and fare table.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Coordinates, IntegrityWarning, StationCode};
use crate::fares::{FareSchema, FareTable, RawBandedTable, RawFlatTable};
use crate::network::{Line, Registry, Station};

use super::dto::{Document, LineDto, StationDto};
use super::error::DataError;

/// A fully loaded data set.
#[derive(Debug, Clone)]
pub struct NetworkData {
    pub registry: Registry,
    pub fares: FareTable,
    /// Everything the load degraded around, in discovery order.
    pub warnings: Vec<IntegrityWarning>,
}

fn json_error(document: Document, e: impl std::fmt::Display) -> DataError {
    DataError::Json {
        document,
        message: e.to_string(),
    }
}

fn from_value<T: DeserializeOwned>(document: Document, value: Value) -> Result<T, DataError> {
    serde_json::from_value(value).map_err(|e| json_error(document, e))
}

/// Decode the stations document.
///
/// Accepts either an object keyed by station code (entries kept in document
/// order) or a plain list of station records.
pub fn decode_stations(bytes: &[u8]) -> Result<Vec<StationDto>, DataError> {
    let document = Document::Stations;
    let value: Value = serde_json::from_slice(bytes).map_err(|e| json_error(document, e))?;

    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(_, v)| from_value(document, v))
            .collect(),
        Value::Array(items) => items.into_iter().map(|v| from_value(document, v)).collect(),
        _ => Err(json_error(
            document,
            "expected an object or array of stations",
        )),
    }
}

/// Decode the lines document: a list of line records.
pub fn decode_lines(bytes: &[u8]) -> Result<Vec<LineDto>, DataError> {
    serde_json::from_slice(bytes).map_err(|e| json_error(Document::Lines, e))
}

/// Decode the fare document using the given schema.
///
/// The schema decides how many levels of nesting are expected; a document
/// of the other shape fails to decode.
pub fn decode_fares(
    bytes: &[u8],
    schema: FareSchema,
) -> Result<(FareTable, Vec<IntegrityWarning>), DataError> {
    let document = Document::Fares;
    let parsed = match schema {
        FareSchema::Flat => {
            let raw: RawFlatTable =
                serde_json::from_slice(bytes).map_err(|e| json_error(document, e))?;
            FareTable::from_flat(raw)?
        }
        FareSchema::Banded => {
            let raw: RawBandedTable =
                serde_json::from_slice(bytes).map_err(|e| json_error(document, e))?;
            FareTable::from_banded(raw)?
        }
    };
    Ok(parsed)
}

fn build_station(dto: StationDto) -> Result<Station, DataError> {
    let invalid = |reason: String| DataError::InvalidStation {
        code: dto.code.clone(),
        reason,
    };

    let code = StationCode::parse(&dto.code).map_err(|e| invalid(e.to_string()))?;
    let [longitude, latitude] = dto.coordinates;
    let coordinates = Coordinates::new(longitude, latitude).map_err(|e| invalid(e.to_string()))?;

    let station = Station::new(dto.name, code, coordinates);
    Ok(match dto.line.filter(|l| !l.is_empty()) {
        Some(line) => station.with_line_code(line),
        None => station,
    })
}

fn build_line(dto: LineDto, warnings: &mut Vec<IntegrityWarning>) -> Line {
    let stations = dto
        .stations
        .into_iter()
        .filter_map(|raw| match StationCode::parse(&raw) {
            Ok(code) => Some(code),
            Err(_) => {
                warnings.push(IntegrityWarning::UnknownLineStation {
                    line: dto.name.clone(),
                    code: raw,
                });
                None
            }
        })
        .collect();

    Line::new(dto.name, dto.color, stations)
}

/// Build the registry and fare table from decoded documents.
///
/// Station records must be valid; line entries that cannot reference a
/// station become warnings instead.
pub fn build_network(
    stations: Vec<StationDto>,
    lines: Vec<LineDto>,
    fares: (FareTable, Vec<IntegrityWarning>),
) -> Result<NetworkData, DataError> {
    let stations = stations
        .into_iter()
        .map(build_station)
        .collect::<Result<Vec<_>, _>>()?;

    let mut warnings = Vec::new();
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|dto| build_line(dto, &mut warnings))
        .collect();

    let registry = Registry::new(stations, lines);
    warnings.extend_from_slice(registry.warnings());

    let (fares, fare_warnings) = fares;
    warnings.extend(fare_warnings);
    warnings.extend(fares.integrity_warnings());

    Ok(NetworkData {
        registry,
        fares,
        warnings,
    })
}

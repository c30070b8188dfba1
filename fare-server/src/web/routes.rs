//! HTTP route handlers.

use std::fmt;
use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, FixedOffset, Utc};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::domain::{FareConfig, FareError, StationCode, TimeBand};
use crate::engine::FareEngine;
use crate::fares::FareSchema;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `data_dir` is the directory the network documents were loaded from, if
/// any; its files are served under `/data`.
pub fn create_router(state: AppState, data_dir: Option<&std::path::Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(list_lines))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:code", get(get_station))
        .route("/api/fare", get(quote_fare));

    let router = match data_dir {
        Some(dir) => router.nest_service("/data", ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all lines.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state
        .engine
        .lines()
        .iter()
        .map(LineResult::from_line)
        .collect();

    Json(LinesResponse { lines })
}

/// List stations, optionally filtered by line.
async fn list_stations(
    State(state): State<AppState>,
    Query(req): Query<StationsQuery>,
) -> Json<StationsResponse> {
    let engine = &state.engine;
    let stations = engine
        .stations_on_line(req.line.as_deref())
        .into_iter()
        .map(|s| StationResult::from_station(s, engine))
        .collect();

    Json(StationsResponse { stations })
}

/// Look up one station by code.
async fn get_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let code = station_code(&code)?;
    station_result(&state.engine, &code).map(Json)
}

/// Price a journey between two stations.
async fn quote_fare(
    State(state): State<AppState>,
    Query(req): Query<FareRequest>,
) -> Result<Json<FareResponse>, AppError> {
    let engine = &state.engine;

    let config = fare_config(&req, engine.schema(), Utc::now(), state.time_zone)?;

    let (Some(from), Some(to)) = (non_blank(req.from.as_deref()), non_blank(req.to.as_deref()))
    else {
        return Ok(Json(FareResponse::Incomplete));
    };
    let from = station_code(from)?;
    let to = station_code(to)?;

    let result = engine.compute_fare(from.as_str(), to.as_str(), &config)?;

    Ok(Json(FareResponse::priced(
        station_result(engine, &from)?,
        station_result(engine, &to)?,
        engine.fares().effective_config(&config),
        result,
    )))
}

fn station_result(engine: &FareEngine, code: &StationCode) -> Result<StationResult, AppError> {
    engine
        .station(code.as_str())
        .map(|s| StationResult::from_station(s, engine))
        .ok_or_else(|| AppError::from(FareError::UnknownStation(code.to_string())))
}

/// Parse a requested station code. A code no station could have is unknown.
fn station_code(value: &str) -> Result<StationCode, AppError> {
    StationCode::parse_normalized(value)
        .map_err(|_| AppError::from(FareError::UnknownStation(value.trim().to_string())))
}

fn option_param<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    non_blank(value)
        .map(str::parse::<T>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build the fare configuration for a request made at `now`.
///
/// Category and payment default to adult and card. Without an explicit
/// band, a banded table is read at the band in force at `now` on the
/// wall clock of `time_zone`.
fn fare_config(
    req: &FareRequest,
    schema: FareSchema,
    now: DateTime<Utc>,
    time_zone: FixedOffset,
) -> Result<FareConfig, AppError> {
    let defaults = FareConfig::default();
    let config = FareConfig::new(
        option_param(req.category.as_deref())?.unwrap_or(defaults.category),
        option_param(req.payment.as_deref())?.unwrap_or(defaults.payment),
    );

    let band: Option<TimeBand> = option_param(req.time_band.as_deref())?;
    Ok(match (band, schema) {
        (Some(band), _) => config.with_time_band(band),
        (None, FareSchema::Banded) => config.with_time_band(TimeBand::at_instant(now, time_zone)),
        (None, FareSchema::Flat) => config,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The request is well formed but the fare data cannot price it.
    Unprocessable { message: String },
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            FareError::MissingFareSlice(_) | FareError::EmptyTierSet(_) => {
                AppError::Unprocessable {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

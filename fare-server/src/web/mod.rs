//! Web layer for the fare server.
//!
//! Provides HTTP endpoints for listing stations and lines and for pricing
//! journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

//! Application state for the web layer.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::engine::FareEngine;

/// Shared application state.
///
/// The engine is read-only after load, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Fare engine over the loaded network
    pub engine: Arc<FareEngine>,

    /// Zone whose wall clock decides the default time band
    pub time_zone: FixedOffset,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: FareEngine, time_zone: FixedOffset) -> Self {
        Self {
            engine: Arc::new(engine),
            time_zone,
        }
    }
}

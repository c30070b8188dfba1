//! Fare query engine.
//!
//! Combines the station registry, the distance estimator and the fare table
//! into the operations callers need: "what does it cost to go from A to B",
//! line-filtered station lists and per-station display color.
//!
//! The engine is built once from loaded data and is immutable afterwards.
//! Every operation is a synchronous, pure function of its inputs, so a single
//! engine can be shared across threads behind an `Arc`.

mod config;
mod query;

pub use config::EngineConfig;
pub use query::{FareEngine, FareQuote, FareResult};

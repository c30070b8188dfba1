//! Station and line registry.
//!
//! Holds the immutable station and line collections for a process and
//! answers line-membership and line-color queries. Membership is decided
//! by explicit list containment on each line; the station code prefix is
//! only used as a fallback for display color.

mod registry;
mod station;

pub use registry::{ALL_LINES, DEFAULT_COLOR, Registry};
pub use station::{Line, Station};

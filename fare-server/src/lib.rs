//! Rail fare estimator server.
//!
//! Answers "how much does it cost to ride from this station to that one?"
//! for a distance-banded fare table, estimating track distance from station
//! coordinates.

pub mod config;
pub mod data;
pub mod distance;
pub mod domain;
pub mod engine;
pub mod fares;
pub mod network;
pub mod web;

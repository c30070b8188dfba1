//! Tiered fare resolution.
//!
//! A fare table maps a passenger category, payment method and (for banded
//! tables) time band to a set of distance tiers. A distance resolves to the
//! fare of the first tier whose bound is at least that distance, falling back
//! to the highest tier. Resolution is pure: no interpolation, no state.

mod table;
mod tiers;

pub use table::{FareSchema, FareTable, InvalidFareTable, RawBandedTable, RawFlatTable, RawTiers};
pub use tiers::{InvalidTier, Tier, TierSet};

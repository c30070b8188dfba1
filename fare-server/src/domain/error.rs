//! Domain error types.
//!
//! `FareError` is the typed failure a fare query can produce. These are
//! expected outcomes for the caller to render, not faults.
//! `IntegrityWarning` records inconsistencies found in loaded data that the
//! engine degrades around instead of failing on.

use super::FareConfig;

/// Why a fare could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// A supplied station code is not in the registry
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The fare table has no entry for the requested configuration
    #[error("no fares for {0}")]
    MissingFareSlice(FareConfig),

    /// The fare table entry exists but holds no distance tiers
    #[error("fares for {0} have no distance tiers")]
    EmptyTierSet(FareConfig),
}

impl FareError {
    /// Whether the failure comes from missing fare data rather than the
    /// station selection.
    ///
    /// An empty tier set is reported the same way as a missing slice.
    pub fn is_missing_fare_data(&self) -> bool {
        matches!(self, Self::MissingFareSlice(_) | Self::EmptyTierSet(_))
    }
}

/// A non-fatal inconsistency found while loading network or fare data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityWarning {
    /// A line lists a station code that no station has
    #[error("line {line} references unknown station {code}")]
    UnknownLineStation { line: String, code: String },

    /// A station is not listed on any line
    #[error("station {code} is not listed on any line")]
    UnlinedStation { code: String },

    /// The same station code was loaded twice; the first one is kept
    #[error("duplicate station {code}; keeping the first entry")]
    DuplicateStation { code: String },

    /// Two fare document keys name the same slice; the first one is kept
    #[error("duplicate fares for {slice}; keeping the first entry")]
    DuplicateFareSlice { slice: FareConfig },

    /// Fares decrease as distance increases within a slice
    #[error("fares for {slice} decrease at a higher distance tier")]
    NonMonotonicTiers { slice: FareConfig },

    /// A fare document key that does not name a known category, method or band
    #[error("ignoring unrecognised fare table key {key:?}")]
    UnrecognisedFareKey { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PassengerCategory, PaymentMethod, TimeBand};

    #[test]
    fn error_display() {
        let err = FareError::UnknownStation("XX9".into());
        assert_eq!(err.to_string(), "unknown station: XX9");

        let slice = FareConfig::new(PassengerCategory::Student, PaymentMethod::Card)
            .with_time_band(TimeBand::Peak);
        let err = FareError::MissingFareSlice(slice);
        assert_eq!(err.to_string(), "no fares for student/card/peak");

        let err = FareError::EmptyTierSet(slice.without_time_band());
        assert_eq!(err.to_string(), "fares for student/card have no distance tiers");
    }

    #[test]
    fn missing_fare_data_classification() {
        let slice = FareConfig::default();
        assert!(FareError::MissingFareSlice(slice).is_missing_fare_data());
        assert!(FareError::EmptyTierSet(slice).is_missing_fare_data());
        assert!(!FareError::UnknownStation("NS1".into()).is_missing_fare_data());
    }

    #[test]
    fn warning_display() {
        let w = IntegrityWarning::UnknownLineStation {
            line: "NS".into(),
            code: "NS99".into(),
        };
        assert_eq!(w.to_string(), "line NS references unknown station NS99");

        let w = IntegrityWarning::UnlinedStation { code: "TE1".into() };
        assert_eq!(w.to_string(), "station TE1 is not listed on any line");

        let w = IntegrityWarning::DuplicateFareSlice {
            slice: FareConfig::default(),
        };
        assert_eq!(w.to_string(), "duplicate fares for adult/card; keeping the first entry");

        let w = IntegrityWarning::UnrecognisedFareKey {
            key: "child".into(),
        };
        assert_eq!(w.to_string(), "ignoring unrecognised fare table key \"child\"");
    }
}

//! Fare tables with and without the time-band dimension.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    FareConfig, FareError, IntegrityWarning, PassengerCategory, PaymentMethod, TimeBand,
};

use super::tiers::{InvalidTier, TierSet};

/// Distance key to fare, as found in fare documents.
pub type RawTiers = BTreeMap<String, f64>;

/// category → method → tiers
pub type RawFlatTable = BTreeMap<String, BTreeMap<String, RawTiers>>;

/// category → method → band → tiers
pub type RawBandedTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, RawTiers>>>;

/// Whether a fare table carries the time-band dimension.
///
/// This is supplied alongside the table; it is never guessed from the
/// document's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FareSchema {
    Flat,
    Banded,
}

impl FareSchema {
    /// Schema selected by a "has time bands" capability flag.
    pub fn from_time_bands(has_time_bands: bool) -> Self {
        if has_time_bands {
            Self::Banded
        } else {
            Self::Flat
        }
    }

    pub fn has_time_bands(&self) -> bool {
        matches!(self, Self::Banded)
    }
}

impl fmt::Display for FareSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("flat"),
            Self::Banded => f.write_str("banded"),
        }
    }
}

/// Error returned when a fare document slice has invalid tiers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("fares for {slice}: {source}")]
pub struct InvalidFareTable {
    /// Document path of the offending slice, e.g. `adult/card/peak`.
    pub slice: String,
    pub source: InvalidTier,
}

type FlatKey = (PassengerCategory, PaymentMethod);
type BandedKey = (PassengerCategory, PaymentMethod, TimeBand);

/// A loaded fare table.
#[derive(Debug, Clone, PartialEq)]
pub enum FareTable {
    /// Fares by category and payment method only.
    Flat(HashMap<FlatKey, TierSet>),

    /// Fares by category, payment method and time band.
    Banded(HashMap<BandedKey, TierSet>),
}

impl FareTable {
    /// Build a flat table from its document form.
    ///
    /// Keys that do not name a known category or method are skipped and
    /// reported as warnings. Keys differing only in case name the same
    /// slice; the first in key order is kept.
    pub fn from_flat(raw: RawFlatTable) -> Result<(Self, Vec<IntegrityWarning>), InvalidFareTable> {
        let mut warnings = Vec::new();
        let mut slices = HashMap::new();

        for (category_key, methods) in raw {
            let Some(category) = parse_key::<PassengerCategory>(&category_key, &mut warnings)
            else {
                continue;
            };
            for (method_key, tiers) in methods {
                let Some(payment) = parse_key::<PaymentMethod>(&method_key, &mut warnings) else {
                    continue;
                };
                let key = (category, payment);
                if slices.contains_key(&key) {
                    warnings.push(IntegrityWarning::DuplicateFareSlice {
                        slice: FareConfig::new(category, payment),
                    });
                    continue;
                }
                let path = format!("{category_key}/{method_key}");
                slices.insert(key, parse_tiers(&path, &tiers)?);
            }
        }

        Ok((Self::Flat(slices), warnings))
    }

    /// Build a banded table from its document form.
    ///
    /// Keys that do not name a known category, method or band are skipped
    /// and reported as warnings. Repeated slices keep their first entry.
    pub fn from_banded(
        raw: RawBandedTable,
    ) -> Result<(Self, Vec<IntegrityWarning>), InvalidFareTable> {
        let mut warnings = Vec::new();
        let mut slices = HashMap::new();

        for (category_key, methods) in raw {
            let Some(category) = parse_key::<PassengerCategory>(&category_key, &mut warnings)
            else {
                continue;
            };
            for (method_key, bands) in methods {
                let Some(payment) = parse_key::<PaymentMethod>(&method_key, &mut warnings) else {
                    continue;
                };
                for (band_key, tiers) in bands {
                    let Some(band) = parse_key::<TimeBand>(&band_key, &mut warnings) else {
                        continue;
                    };
                    let key = (category, payment, band);
                    if slices.contains_key(&key) {
                        warnings.push(IntegrityWarning::DuplicateFareSlice {
                            slice: FareConfig::new(category, payment).with_time_band(band),
                        });
                        continue;
                    }
                    let path = format!("{category_key}/{method_key}/{band_key}");
                    slices.insert(key, parse_tiers(&path, &tiers)?);
                }
            }
        }

        Ok((Self::Banded(slices), warnings))
    }

    pub fn schema(&self) -> FareSchema {
        match self {
            Self::Flat(_) => FareSchema::Flat,
            Self::Banded(_) => FareSchema::Banded,
        }
    }

    /// The configuration actually used to select a slice.
    ///
    /// Flat tables ignore the time band.
    pub fn effective_config(&self, config: &FareConfig) -> FareConfig {
        match self {
            Self::Flat(_) => config.without_time_band(),
            Self::Banded(_) => *config,
        }
    }

    /// The tiers for a configuration.
    ///
    /// A banded table needs a time band; without one the slice is missing.
    pub fn slice(&self, config: &FareConfig) -> Result<&TierSet, FareError> {
        let found = match self {
            Self::Flat(slices) => slices.get(&(config.category, config.payment)),
            Self::Banded(slices) => config
                .time_band
                .and_then(|band| slices.get(&(config.category, config.payment, band))),
        };
        found.ok_or_else(|| FareError::MissingFareSlice(self.effective_config(config)))
    }

    /// Resolve the fare for a distance under a configuration.
    ///
    /// ```
    /// use fare_server::domain::{FareConfig, PassengerCategory, PaymentMethod};
    /// use fare_server::fares::FareTable;
    ///
    /// let doc = r#"{"adult": {"card": {"1": 1.19, "3": 1.19, "5": 1.41, "40": 2.19}}}"#;
    /// let (table, _) = FareTable::from_flat(serde_json::from_str(doc).unwrap()).unwrap();
    ///
    /// let adult_card = FareConfig::new(PassengerCategory::Adult, PaymentMethod::Card);
    /// assert_eq!(table.resolve(4.2, &adult_card), Ok(1.41));
    /// assert_eq!(table.resolve(999.0, &adult_card), Ok(2.19));
    /// ```
    pub fn resolve(&self, distance_km: f64, config: &FareConfig) -> Result<f64, FareError> {
        self.slice(config)?
            .resolve(distance_km)
            .ok_or_else(|| FareError::EmptyTierSet(self.effective_config(config)))
    }

    /// All slices with their configurations, in a stable order.
    pub fn slices(&self) -> Vec<(FareConfig, &TierSet)> {
        let mut slices: Vec<(FareConfig, &TierSet)> = match self {
            Self::Flat(s) => s
                .iter()
                .map(|(&(c, p), tiers)| (FareConfig::new(c, p), tiers))
                .collect(),
            Self::Banded(s) => s
                .iter()
                .map(|(&(c, p, b), tiers)| (FareConfig::new(c, p).with_time_band(b), tiers))
                .collect(),
        };
        slices.sort_by_key(|(config, _)| (config.category, config.payment, config.time_band));
        slices
    }

    /// Slices whose fares decrease at a higher distance tier.
    pub fn integrity_warnings(&self) -> Vec<IntegrityWarning> {
        self.slices()
            .into_iter()
            .filter(|(_, tiers)| !tiers.is_monotonic())
            .map(|(slice, _)| IntegrityWarning::NonMonotonicTiers { slice })
            .collect()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(s) => s.len(),
            Self::Banded(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_key<T: FromStr>(key: &str, warnings: &mut Vec<IntegrityWarning>) -> Option<T> {
    let parsed = key.parse().ok();
    if parsed.is_none() {
        warnings.push(IntegrityWarning::UnrecognisedFareKey {
            key: key.to_string(),
        });
    }
    parsed
}

fn parse_tiers(path: &str, tiers: &RawTiers) -> Result<TierSet, InvalidFareTable> {
    TierSet::parse(tiers.iter().map(|(k, v)| (k.as_str(), *v))).map_err(|source| {
        InvalidFareTable {
            slice: path.to_string(),
            source,
        }
    })
}

//! Distance tiers for a single fare slice.

/// Error returned when a distance tier or its fare is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidTier {
    /// The tier key does not parse as a number
    #[error("distance tier {0:?} is not a number")]
    NotANumber(String),

    /// The tier's distance bound is negative
    #[error("distance tier {0} km is negative")]
    NegativeDistance(f64),

    /// The fare is negative or not finite
    #[error("fare {fare} for the {upper_km} km tier must be a non-negative amount")]
    InvalidFare { upper_km: f64, fare: f64 },

    /// Two keys parse to the same distance
    #[error("distance tier {0} km appears more than once")]
    Duplicate(f64),
}

/// A distance upper bound and the fare charged up to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Inclusive upper bound in kilometres. May be infinite.
    pub upper_km: f64,
    pub fare: f64,
}

/// The tiers of one fare slice, strictly increasing by distance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TierSet {
    tiers: Vec<Tier>,
}

impl TierSet {
    /// Build a tier set, sorting by distance and validating every tier.
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Result<Self, InvalidTier> {
        let mut tiers: Vec<Tier> = tiers.into_iter().collect();

        for tier in &tiers {
            if tier.upper_km.is_nan() {
                return Err(InvalidTier::NotANumber(tier.upper_km.to_string()));
            }
            if tier.upper_km < 0.0 {
                return Err(InvalidTier::NegativeDistance(tier.upper_km));
            }
            if !tier.fare.is_finite() || tier.fare < 0.0 {
                return Err(InvalidTier::InvalidFare {
                    upper_km: tier.upper_km,
                    fare: tier.fare,
                });
            }
        }

        tiers.sort_by(|a, b| a.upper_km.total_cmp(&b.upper_km));

        if let Some(pair) = tiers.windows(2).find(|w| w[0].upper_km == w[1].upper_km) {
            return Err(InvalidTier::Duplicate(pair[0].upper_km));
        }

        Ok(Self { tiers })
    }

    /// Parse document tiers: string distance keys mapped to fares.
    ///
    /// Keys are read as decimal kilometres; `"inf"` is accepted for an
    /// open-ended final tier.
    pub fn parse<'a>(raw: impl IntoIterator<Item = (&'a str, f64)>) -> Result<Self, InvalidTier> {
        let tiers = raw
            .into_iter()
            .map(|(key, fare)| {
                let upper_km = key
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|d| !d.is_nan())
                    .ok_or_else(|| InvalidTier::NotANumber(key.to_string()))?;
                Ok(Tier { upper_km, fare })
            })
            .collect::<Result<Vec<_>, InvalidTier>>()?;

        Self::new(tiers)
    }

    /// The fare for a distance.
    ///
    /// Picks the first tier whose bound is at least `distance_km`, so a
    /// distance on a boundary belongs to that tier. Distances beyond every
    /// tier get the highest tier's fare. Returns `None` only when there are
    /// no tiers.
    pub fn resolve(&self, distance_km: f64) -> Option<f64> {
        self.tiers
            .iter()
            .find(|t| distance_km <= t.upper_km)
            .or_else(|| self.tiers.last())
            .map(|t| t.fare)
    }

    /// Whether fares never decrease as distance increases.
    pub fn is_monotonic(&self) -> bool {
        self.tiers.windows(2).all(|w| w[0].fare <= w[1].fare)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

//! Fare configuration: who is travelling, how they pay, and when.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown fare option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct InvalidFareOption {
    kind: &'static str,
    value: String,
}

/// Passenger category, selecting a pricing table slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassengerCategory {
    Adult,
    Student,
    Senior,
}

/// How the passenger pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Card,
    Cash,
}

/// Time-of-day pricing band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeBand {
    Peak,
    OffPeak,
}

impl PassengerCategory {
    pub const ALL: [PassengerCategory; 3] = [Self::Adult, Self::Student, Self::Senior];

    /// The key used for this category in fare documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Student => "student",
            Self::Senior => "senior",
        }
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [Self::Card, Self::Cash];

    /// The key used for this payment method in fare documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

/// Weekday journeys starting before this time are off-peak.
const OFF_PEAK_CUTOFF: (u32, u32) = (7, 45);

/// Offset of network local time (Singapore, UTC+08:00) from UTC, in seconds.
pub const NETWORK_UTC_OFFSET_SECS: i32 = 8 * 60 * 60;

impl TimeBand {
    pub const ALL: [TimeBand; 2] = [Self::Peak, Self::OffPeak];

    /// The key used for this band in fare documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::OffPeak => "offPeak",
        }
    }

    /// Classify a local departure time.
    ///
    /// Off-peak is before 07:45 on weekdays; everything else, including
    /// weekends, is peak. Public holidays are not modelled.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fare_server::domain::TimeBand;
    ///
    /// // Friday 15 March 2024
    /// let early = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(7, 30, 0).unwrap();
    /// assert_eq!(TimeBand::at(early), TimeBand::OffPeak);
    /// ```
    pub fn at(when: NaiveDateTime) -> Self {
        let weekday = !matches!(when.weekday(), Weekday::Sat | Weekday::Sun);
        if weekday && (when.hour(), when.minute()) < OFF_PEAK_CUTOFF {
            Self::OffPeak
        } else {
            Self::Peak
        }
    }

    /// Classify an instant by its wall-clock time in `zone`.
    pub fn at_instant(instant: DateTime<Utc>, zone: FixedOffset) -> Self {
        Self::at(instant.with_timezone(&zone).naive_local())
    }
}

macro_rules! impl_option_text {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = InvalidFareOption;

            /// Parse a document key, ignoring ASCII case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| InvalidFareOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_option_text!(PassengerCategory, "passenger category");
impl_option_text!(PaymentMethod, "payment method");
impl_option_text!(TimeBand, "time band");

/// The fare configuration for a query.
///
/// `time_band` is only consulted when the loaded fare table carries the
/// time-band dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareConfig {
    pub category: PassengerCategory,
    pub payment: PaymentMethod,
    pub time_band: Option<TimeBand>,
}

impl FareConfig {
    /// Create a configuration without a time band.
    pub fn new(category: PassengerCategory, payment: PaymentMethod) -> Self {
        Self {
            category,
            payment,
            time_band: None,
        }
    }

    /// Set the time band.
    pub fn with_time_band(mut self, band: TimeBand) -> Self {
        self.time_band = Some(band);
        self
    }

    /// The same configuration with the time band removed.
    pub fn without_time_band(mut self) -> Self {
        self.time_band = None;
        self
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self::new(PassengerCategory::Adult, PaymentMethod::Card)
    }
}

impl fmt::Display for FareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.payment)?;
        if let Some(band) = self.time_band {
            write!(f, "/{band}")?;
        }
        Ok(())
    }
}

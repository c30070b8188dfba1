//! Station code type.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code such as `NS1` or `CC29`.
///
/// Station codes are one or more uppercase ASCII letters (the line code)
/// followed by one or more ASCII digits. This type guarantees that any
/// `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use fare_server::domain::StationCode;
///
/// let code = StationCode::parse("NS1").unwrap();
/// assert_eq!(code.as_str(), "NS1");
/// assert_eq!(code.line_code(), "NS");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("ns1").is_err());
///
/// // Both parts are required
/// assert!(StationCode::parse("NS").is_err());
/// assert!(StationCode::parse("12").is_err());
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode {
    code: String,
    prefix_len: usize,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be uppercase ASCII letters followed by ASCII digits,
    /// with at least one of each.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        let prefix_len = s.bytes().take_while(u8::is_ascii_uppercase).count();
        if prefix_len == 0 {
            return Err(InvalidStationCode {
                reason: "must start with uppercase ASCII letters A-Z",
            });
        }

        let digits = &s.as_bytes()[prefix_len..];
        if digits.is_empty() {
            return Err(InvalidStationCode {
                reason: "must end with a station number",
            });
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(InvalidStationCode {
                reason: "station number must be ASCII digits 0-9",
            });
        }

        Ok(Self {
            code: s.to_string(),
            prefix_len,
        })
    }

    /// Parse a station code, accepting lowercase and surrounding whitespace.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Returns the line code prefix (e.g. `"NS"` for `NS1`).
    pub fn line_code(&self) -> &str {
        &self.code[..self.prefix_len]
    }
}

// Equality, ordering and hashing go through the code string alone so that
// `Borrow<str>` lookups agree with `str`'s own `Hash`.
impl PartialEq for StationCode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for StationCode {}

impl Hash for StationCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for StationCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StationCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl Borrow<str> for StationCode {
    fn borrow(&self) -> &str {
        &self.code
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.code
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.code)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("NS1").is_ok());
        assert!(StationCode::parse("CC29").is_ok());
        assert!(StationCode::parse("EW4").is_ok());
        assert!(StationCode::parse("BP10").is_ok());
        assert!(StationCode::parse("A0").is_ok());
    }

    #[test]
    fn line_code_is_letter_prefix() {
        assert_eq!(StationCode::parse("NS1").unwrap().line_code(), "NS");
        assert_eq!(StationCode::parse("CC29").unwrap().line_code(), "CC");
        assert_eq!(StationCode::parse("A0").unwrap().line_code(), "A");
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("ns1").is_err());
        assert!(StationCode::parse("Ns1").is_err());
    }

    #[test]
    fn reject_missing_parts() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("NS").is_err());
        assert!(StationCode::parse("12").is_err());
    }

    #[test]
    fn reject_trailing_garbage() {
        assert!(StationCode::parse("NS1A").is_err());
        assert!(StationCode::parse("NS 1").is_err());
        assert!(StationCode::parse("NS-1").is_err());
        assert!(StationCode::parse("NS1 ").is_err());
    }

    #[test]
    fn parse_normalized_accepts_lowercase_and_whitespace() {
        let code = StationCode::parse_normalized("  ns24 ").unwrap();
        assert_eq!(code.as_str(), "NS24");
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("NE7").unwrap();
        assert_eq!(format!("{}", code), "NE7");
        assert_eq!(format!("{:?}", code), "StationCode(NE7)");
    }

    #[test]
    fn borrow_as_str_for_map_lookup() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(StationCode::parse("NS1").unwrap(), "Jurong East");
        assert_eq!(map.get("NS1"), Some(&"Jurong East"));
        assert_eq!(map.get("NS2"), None);
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let code = StationCode::parse("CC4").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"CC4\"");
        let back: StationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<StationCode>("\"cc4\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any letters-then-digits string parses and splits at the boundary
        #[test]
        fn valid_always_parses(prefix in "[A-Z]{1,4}", number in "[0-9]{1,3}") {
            let s = format!("{prefix}{number}");
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
            prop_assert_eq!(code.line_code(), prefix.as_str());
        }

        /// Lowercase letters are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,3}[0-9]{1,3}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Codes without a number are rejected
        #[test]
        fn letters_only_rejected(s in "[A-Z]{1,6}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}

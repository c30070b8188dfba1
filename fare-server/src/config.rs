//! Server configuration from the environment.

use std::net::SocketAddr;

use chrono::FixedOffset;

use crate::data::DataClientConfig;
use crate::domain::NETWORK_UTC_OFFSET_SECS;
use crate::engine::EngineConfig;
use crate::fares::FareSchema;

/// Default address to listen on.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory holding the data documents.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data: DataClientConfig,
    pub engine: EngineConfig,
    /// Zone whose wall clock decides the default time band
    pub time_zone: FixedOffset,
}

impl ServerConfig {
    /// Read configuration from `FARE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("FARE_BIND_ADDR") {
            Some(value) => parse_var("FARE_BIND_ADDR", &value)?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError {
                    var: "FARE_BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                    reason: e.to_string(),
                })?,
        };

        let data = match get("FARE_DATA_URL") {
            Some(url) => DataClientConfig::http(url),
            None => DataClientConfig::directory(
                get("FARE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
        };

        let data = match get("FARE_TIME_BANDS") {
            Some(value) => data.with_schema(FareSchema::from_time_bands(parse_bool(
                "FARE_TIME_BANDS",
                &value,
            )?)),
            None => data,
        };

        let data = match get("FARE_HTTP_TIMEOUT_SECS") {
            Some(value) => data.with_timeout_secs(parse_var("FARE_HTTP_TIMEOUT_SECS", &value)?),
            None => data,
        };

        let mut engine = EngineConfig::default();
        if let Some(value) = get("FARE_CORRECTION_FACTOR") {
            let factor: f64 = parse_var("FARE_CORRECTION_FACTOR", &value)?;
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError {
                    var: "FARE_CORRECTION_FACTOR",
                    value,
                    reason: "must be a positive number".into(),
                });
            }
            engine = engine.with_correction_factor(factor);
        }
        if let Some(color) = get("FARE_DEFAULT_COLOR") {
            engine = engine.with_default_color(color.trim());
        }

        let time_zone = match get("FARE_TZ_OFFSET") {
            Some(value) => parse_var("FARE_TZ_OFFSET", &value)?,
            None => FixedOffset::east_opt(NETWORK_UTC_OFFSET_SECS).ok_or_else(|| ConfigError {
                var: "FARE_TZ_OFFSET",
                value: NETWORK_UTC_OFFSET_SECS.to_string(),
                reason: "offset out of range".into(),
            })?,
        };

        Ok(Self {
            bind_addr,
            data,
            engine,
            time_zone,
        })
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(
            config.data.source,
            DataSource::Directory(PathBuf::from("data"))
        );
        assert_eq!(config.data.schema, FareSchema::Banded);
        assert_eq!(config.data.timeout_secs, 30);
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.time_zone.local_minus_utc(), 8 * 60 * 60);
    }

    #[test]
    fn time_zone_offset() {
        let config = config_from(&[("FARE_TZ_OFFSET", "+00:00")]).unwrap();
        assert_eq!(config.time_zone.local_minus_utc(), 0);

        let config = config_from(&[("FARE_TZ_OFFSET", "+05:30")]).unwrap();
        assert_eq!(config.time_zone.local_minus_utc(), 5 * 60 * 60 + 30 * 60);

        let err = config_from(&[("FARE_TZ_OFFSET", "SGT")]).unwrap_err();
        assert_eq!(err.var, "FARE_TZ_OFFSET");
    }

    #[test]
    fn url_takes_precedence_over_directory() {
        let config = config_from(&[
            ("FARE_DATA_DIR", "/srv/fares"),
            ("FARE_DATA_URL", "https://example.com/data"),
        ])
        .unwrap();
        assert_eq!(
            config.data.source,
            DataSource::Http {
                base_url: "https://example.com/data".into()
            }
        );

        let config = config_from(&[("FARE_DATA_DIR", "/srv/fares"), ("FARE_DATA_URL", "")]).unwrap();
        assert_eq!(
            config.data.source,
            DataSource::Directory(PathBuf::from("/srv/fares"))
        );
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("FARE_BIND_ADDR", "0.0.0.0:8080"),
            ("FARE_TIME_BANDS", "no"),
            ("FARE_CORRECTION_FACTOR", "1.3"),
            ("FARE_DEFAULT_COLOR", "#000000"),
            ("FARE_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.data.schema, FareSchema::Flat);
        assert_eq!(config.data.timeout_secs, 5);
        assert_eq!(config.engine.correction_factor, 1.3);
        assert_eq!(config.engine.default_color, "#000000");
    }

    #[test]
    fn time_band_flag_spellings() {
        for value in ["true", "TRUE", "1", "yes", "on"] {
            let config = config_from(&[("FARE_TIME_BANDS", value)]).unwrap();
            assert_eq!(config.data.schema, FareSchema::Banded, "{value}");
        }
        for value in ["false", "0", "No", "off"] {
            let config = config_from(&[("FARE_TIME_BANDS", value)]).unwrap();
            assert_eq!(config.data.schema, FareSchema::Flat, "{value}");
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from(&[("FARE_TIME_BANDS", "maybe")]).unwrap_err();
        assert_eq!(err.var, "FARE_TIME_BANDS");

        let err = config_from(&[("FARE_BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.var, "FARE_BIND_ADDR");

        let err = config_from(&[("FARE_HTTP_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert_eq!(err.var, "FARE_HTTP_TIMEOUT_SECS");

        for factor in ["zero", "0", "-1.15", "NaN"] {
            let err = config_from(&[("FARE_CORRECTION_FACTOR", factor)]).unwrap_err();
            assert_eq!(err.var, "FARE_CORRECTION_FACTOR", "{factor}");
        }
    }

    #[test]
    fn error_display() {
        let err = ConfigError {
            var: "FARE_TIME_BANDS",
            value: "maybe".into(),
            reason: "expected true or false".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for FARE_TIME_BANDS: \"maybe\" (expected true or false)"
        );
    }
}

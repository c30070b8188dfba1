//! Document fetching from a directory or an HTTP base URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::fares::FareSchema;

use super::convert::{NetworkData, build_network, decode_fares, decode_lines, decode_stations};
use super::dto::Document;
use super::error::DataError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A local directory containing the three document files.
    Directory(PathBuf),

    /// A base URL under which the three document files are served.
    Http { base_url: String },
}

/// Configuration for the data client.
#[derive(Debug, Clone, PartialEq)]
pub struct DataClientConfig {
    pub source: DataSource,
    /// Whether the fare document carries the time-band dimension.
    pub schema: FareSchema,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl DataClientConfig {
    /// Load from a local directory, expecting a banded fare table.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DataSource::Directory(path.into()),
            schema: FareSchema::Banded,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from a base URL, expecting a banded fare table.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self {
            source: DataSource::Http {
                base_url: base_url.into(),
            },
            schema: FareSchema::Banded,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the fare table schema.
    pub fn with_schema(mut self, schema: FareSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client that fetches and decodes the network documents.
#[derive(Debug, Clone)]
pub struct DataClient {
    http: reqwest::Client,
    source: DataSource,
    schema: FareSchema,
}

impl DataClient {
    /// Create a new data client.
    pub fn new(config: DataClientConfig) -> Result<Self, DataError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            source: config.source,
            schema: config.schema,
        })
    }

    /// The local data directory, if loading from disk.
    pub fn directory(&self) -> Option<&Path> {
        match &self.source {
            DataSource::Directory(path) => Some(path),
            DataSource::Http { .. } => None,
        }
    }

    /// Fetch the raw bytes of one document.
    pub async fn fetch(&self, document: Document) -> Result<Vec<u8>, DataError> {
        match &self.source {
            DataSource::Directory(dir) => {
                let path = dir.join(document.file_name());
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| DataError::Io { document, source })
            }
            DataSource::Http { base_url } => {
                let url = format!(
                    "{}/{}",
                    base_url.trim_end_matches('/'),
                    document.file_name()
                );

                let response = self.http.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(DataError::Api {
                        document,
                        status: status.as_u16(),
                    });
                }

                Ok(response.bytes().await?.to_vec())
            }
        }
    }

    /// Fetch all three documents concurrently and build the network.
    ///
    /// Integrity warnings are logged and returned with the data.
    pub async fn load(&self) -> Result<NetworkData, DataError> {
        let (stations, lines, fares) = futures::try_join!(
            self.fetch(Document::Stations),
            self.fetch(Document::Lines),
            self.fetch(Document::Fares),
        )?;

        let data = build_network(
            decode_stations(&stations)?,
            decode_lines(&lines)?,
            decode_fares(&fares, self.schema)?,
        )?;

        for warning in &data.warnings {
            warn!(%warning, "data integrity");
        }
        info!(
            stations = data.registry.len(),
            lines = data.registry.lines().len(),
            fare_slices = data.fares.len(),
            schema = %data.fares.schema(),
            warnings = data.warnings.len(),
            "loaded network data"
        );

        Ok(data)
    }
}

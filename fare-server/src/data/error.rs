//! Data loading error types.

use crate::fares::InvalidFareTable;

use super::dto::Document;

/// Errors that can occur while loading network data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a document from disk failed
    #[error("failed to read {document}: {source}")]
    Io {
        document: Document,
        source: std::io::Error,
    },

    /// The server returned an error status for a document
    #[error("API error {status} fetching {document}")]
    Api { document: Document, status: u16 },

    /// A document is not valid JSON of the expected shape
    #[error("JSON parse error in {document}: {message}")]
    Json { document: Document, message: String },

    /// A station record cannot be used
    #[error("invalid station {code:?}: {reason}")]
    InvalidStation { code: String, reason: String },

    /// The fare table has an unusable slice
    #[error("invalid fare table: {0}")]
    FareTable(#[from] InvalidFareTable),
}

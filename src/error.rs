//! Error types for pokeapi-csv
//!
//! One crate-wide [`Error`] covers the whole pipeline:
//! - transport and HTTP status failures while talking to the API
//! - response bodies that do not decode into the expected shape
//! - serialization and file-system failures while writing CSV output
//! - configuration and receiver state errors
//!
//! Non-numeric resource IDs are not an error; they resolve to `-1`
//! (see [`crate::text::get_url_id`]).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pokeapi-csv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pokeapi-csv
#[derive(Debug, Error)]
pub enum Error {
    /// Request could not be sent or its body could not be read
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that was requested
        url: String,
        /// Underlying transport error (connect, timeout, body read)
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status code
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// Response body did not decode into the expected JSON shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The URL whose body failed to decode
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Attempt to serialize zero records
    #[error("no entries to write to {path}")]
    EmptyInput {
        /// Target file that was left untouched
        path: PathBuf,
    },

    /// Directory or file creation failed
    #[error("file system error at {path}: {source}")]
    FileSystem {
        /// Path that could not be created or opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing CSV rows failed
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api.limit")
        key: Option<String>,
    },

    /// Receiver method called before the receiver reached the required state
    #[error("cannot {operation} on {endpoint} receiver in state {state}")]
    InvalidState {
        /// Endpoint served by the receiver
        endpoint: &'static str,
        /// The operation that was attempted
        operation: &'static str,
        /// The state the receiver was in
        state: String,
    },

    /// Fetch scheduled for a slot past the end of the slot array
    #[error("slot {index} out of range for {endpoint} receiver with {len} slots")]
    SlotOutOfRange {
        /// Endpoint served by the receiver
        endpoint: &'static str,
        /// Requested slot
        index: usize,
        /// Number of allocated slots
        len: usize,
    },
}

impl Error {
    /// Build a [`Error::Config`] for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Whether the failure happened while talking to the remote API
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. } | Error::HttpStatus { .. })
    }

    /// Machine-readable error code, used as a structured log field
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Network { .. } | Error::HttpStatus { .. } => "network_error",
            Error::Decode { .. } => "decode_error",
            Error::EmptyInput { .. } => "empty_input",
            Error::FileSystem { .. } | Error::Csv(_) => "file_system_error",
            Error::Config { .. } => "config_error",
            Error::InvalidState { .. } | Error::SlotOutOfRange { .. } => "invalid_state",
        }
    }
}

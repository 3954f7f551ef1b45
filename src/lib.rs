//! Radiosonde Fetcher Library
//!
//! A Rust library for retrieving upper-air radiosonde sounding data from the
//! University of Wyoming weather archive and converting it into typed tables.
//!
//! This library provides tools for:
//! - Formatting archive query URLs with calendar validation
//! - Extracting the fixed-width sounding table from the HTML response
//! - Decoding fixed-width observation records with explicit missing-value handling
//! - Writing sounding tables to self-describing Parquet files
//! - Comprehensive error handling with fail-fast semantics

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod decoder;
        pub mod fetch;
        pub mod parquet_writer;
        pub mod request;
        pub mod retrieval;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ObservationRecord, SoundingTable};
pub use app::services::request::{Encoding, SoundingRequest};
pub use app::services::retrieval::retrieve;

/// Result type alias for the radiosonde fetcher
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sounding retrieval operations
///
/// Every variant identifies the offending input (URL, line index and raw
/// content, or destination path). No error is retried automatically; a
/// single-shot retrieval fails fast.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Calendar construction failed before any network activity
    #[error("invalid date: {year:04}-{month:02}-{day:02} hour {hour} is not a valid UTC time")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },

    /// Unknown response encoding selector
    #[error("unsupported encoding '{selector}' (expected 'text' or 'bufr')")]
    UnsupportedEncoding { selector: String },

    /// Network or HTTP layer could not retrieve the page
    #[error("transport failure for '{url}': {message}")]
    TransportFailure {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// One fixed-width line did not decode; the whole retrieval is abandoned
    #[error("malformed record at line {line}: {reason} (raw: {content:?})")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },

    /// The response body did not match the expected table shape
    #[error("parse failure: {message}")]
    ParseFailure {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Destination write or read-back failed
    #[error("persistence failure for '{path}': {message}")]
    Persistence {
        path: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid date error
    pub fn invalid_date(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            hour,
        }
    }

    /// Create an unsupported encoding error
    pub fn unsupported_encoding(selector: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            selector: selector.into(),
        }
    }

    /// Create a transport failure with the attempted URL
    pub fn transport(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::TransportFailure {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a malformed record error with the line index and raw content
    pub fn malformed_record(
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse failure, optionally wrapping a lower-level error
    pub fn parse_failure(message: impl Into<String>, source: Option<Error>) -> Self {
        Self::ParseFailure {
            message: message.into(),
            source: source.map(Box::new),
        }
    }

    /// Create a persistence error for a destination path
    pub fn persistence(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.display().to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error carrying the underlying write failure
    pub fn persistence_with(
        path: &std::path::Path,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Persistence {
            path: path.display().to_string(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

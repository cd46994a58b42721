//! Typed errors for the scraper.
//!
//! Per-page failures (`FetchError`, `ParseError`) are soft: the aggregator
//! logs them and moves on. Only `ScrapeError` aborts a run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a page fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request failed before a response arrived
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// No page stored for this URL (in-memory fetcher)
    #[error("no page for {url}")]
    NotFound { url: String },

    /// robots.txt disallows the URL
    #[error("robots.txt disallows {url}")]
    Disallowed { url: String },
}

/// Errors turning markup into a queryable document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("markup is empty")]
    EmptyMarkup,

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors from link discovery.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no rows found")]
    NoRowsFound,
}

/// Errors from the tabular writer.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL in config `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] ParseError),
}

/// Run-level errors.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Nothing to process; no artifact is written
    #[error("no match links discovered: {reason}")]
    EmptyDiscovery { reason: String },

    #[error("failed to write output: {0}")]
    Write(#[from] WriteError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for a whole run.
pub type Result<T> = std::result::Result<T, ScrapeError>;

//! Error types for GeoLens operations.
//!
//! Only the primary page fetch and URL validation can fail. Auxiliary
//! probes degrade to "not found" and the pure stages (extraction, checks,
//! scoring, recommendations) never return errors.
//!
//! # Example
//!
//! ```rust
//! use geolens_core::{GeoLensError, Result};
//!
//! fn require_https(url: &str) -> Result<()> {
//!     if !url.starts_with("https://") {
//!         return Err(GeoLensError::InvalidUrl(url.to_string()));
//!     }
//!     Ok(())
//! }
//! # assert!(require_https("http://example.com").is_err());
//! ```

use thiserror::Error;

/// Main error type for audit operations.
#[derive(Error, Debug)]
pub enum GeoLensError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, refused connections, TLS errors and body read
    /// failures of the primary page fetch.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The primary page answered with a non-success status.
    #[error("Failed to fetch website: HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Result could not be rendered.
    #[error("Failed to serialize result: {0}")]
    Serialization(String),

    /// File write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for GeoLensError.
pub type Result<T> = std::result::Result<T, GeoLensError>;

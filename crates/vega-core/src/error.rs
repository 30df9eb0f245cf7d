//! Error types for the vega scraper core
//!
//! Provides the error enum shared by every extraction procedure, with
//! human-readable messages and string serialization for callers that
//! ship results over a JSON boundary.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all extraction operations
///
/// Covers transport exceptions and parsing faults. "Page reachable but
/// target absent" is NOT an error; that outcome is modeled as
/// [`crate::Extraction::Fail`].
#[derive(Error, Debug)]
pub enum VegaError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Failed to decode an obfuscated redirect payload
    #[error("Failed to decode redirect payload: {0}")]
    DecodeError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Serialize for VegaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, VegaError>;

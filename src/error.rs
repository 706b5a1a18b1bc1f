//! Error types for fetching, locating and configuration.

use thiserror::Error;

/// Failure of a current-conditions request.
///
/// The `Display` output is what the conditions panel shows after `Error: `.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with a non-2xx status.
    #[error("Network response was not ok")]
    Status(reqwest::StatusCode),

    /// Connection or protocol failure. The source never carries the
    /// request URL.
    #[error("Network request failed")]
    Transport(#[source] reqwest::Error),

    /// A 2xx body that does not describe current conditions.
    #[error("Malformed weather response: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Payload(err.to_string())
    }
}

/// Failure of a device-location lookup. Only ever logged.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("location request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("location service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown city '{0}' (expected one of: {1})")]
    UnknownCity(String, String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

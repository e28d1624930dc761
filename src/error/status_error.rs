//! Unified error type for the status service.

use thiserror::Error;

use crate::traits::HttpError;

/// Errors that escape the per-folder checks.
///
/// Per-folder failures never become a `StatusError`; they are folded into
/// an offline [`crate::models::StatusResult`]. What remains are failures of
/// the listing request, of the poll as a whole, of configuration, and of
/// the server itself.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The listing request could not be sent or its body not read.
    #[error("Failed to fetch directory listing from {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The listing endpoint answered with a non-2xx status.
    #[error("Directory listing at {url} returned HTTP {status}")]
    ListingStatus { url: String, status: u16 },

    /// A check task panicked or was cancelled before finishing.
    #[error("Status check for '{folder}' did not complete: {message}")]
    CheckAborted { folder: String, message: String },

    /// A configuration value was rejected.
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    /// Socket or stdio failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatusError {
    /// Build a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        StatusError::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StatusError::Listing { .. } => "E_LISTING",
            StatusError::ListingStatus { .. } => "E_LISTING_HTTP",
            StatusError::CheckAborted { .. } => "E_CHECK_ABORTED",
            StatusError::Config { .. } => "E_CONFIG",
            StatusError::Io(_) => "E_IO",
            StatusError::Json(_) => "E_JSON",
        }
    }
}

//! Error types for element transfer.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a transferred element.
#[derive(Debug, Error)]
pub enum TransferError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload written by an unknown format version.
    #[error("unsupported transfer format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}

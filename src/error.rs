//! Errors raised while encoding values as JSON.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// JSON has no representation for NaN or infinities.
    #[error("Inf and NaN cannot be JSON encoded (found {0} at `{1}`)")]
    NonFinite(f64, String),

    /// Callables have no data to encode.
    #[error("Callable at `{0}` cannot be JSON encoded")]
    Callable(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, EncodeError>;

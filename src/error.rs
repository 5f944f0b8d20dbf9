//! Error types for the Yobit client library.

use thiserror::Error;

/// The main error type for all Yobit client operations.
#[derive(Error, Debug)]
pub enum YobitError {
    /// A required request field was missing or zero.
    ///
    /// Raised before a nonce is consumed and before any network I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The nonce record could not be read or persisted.
    #[error("Nonce storage error for record {key}: {source}")]
    Storage {
        /// Name of the nonce record.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Response body was not JSON or did not match the expected shape
    #[error("Failed to decode response: {message}. Body: {body}")]
    Decode {
        /// Decoder message.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Yobit reported `success: 0` together with an error message
    #[error("Yobit API error: {0}")]
    Api(ApiError),

    /// Parameters could not be form-encoded
    #[error("Failed to encode request parameters: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for YobitError {
    fn from(err: reqwest::Error) -> Self {
        YobitError::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl YobitError {
    pub(crate) fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        YobitError::Storage {
            key: key.into(),
            source,
        }
    }

    /// Returns the application-level error if the server rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            YobitError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// An application-level failure reported by Yobit.
///
/// The message is the `error` string of the response, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The server's error message.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Create a new API error from a server message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Check if the server rejected the request nonce.
    ///
    /// Yobit reports the expected range, e.g.
    /// `invalid nonce (has already been used)` or
    /// `invalid nonce key, must be in range 1 - 2147483646`.
    pub fn is_invalid_nonce(&self) -> bool {
        self.message.to_ascii_lowercase().contains("invalid nonce")
    }

    /// Check if the key was unknown or the signature did not verify.
    pub fn is_invalid_key(&self) -> bool {
        let lower = self.message.to_ascii_lowercase();
        lower.contains("invalid key") || lower.contains("invalid sign")
    }

    /// Check if the account had insufficient funds.
    pub fn is_insufficient_funds(&self) -> bool {
        self.message.to_ascii_lowercase().contains("insufficient funds")
    }
}

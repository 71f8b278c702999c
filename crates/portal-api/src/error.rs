//! Error types for the portal search client.

use std::fmt;

/// Errors reported by the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Authentication or authorization failure.
    Auth { message: String },
    /// Rate limit exceeded.
    RateLimit { retry_after: Option<u64> },
    /// The portal rejected the request parameters.
    Validation { message: String },
    /// Network/connection error.
    Network { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Auth { message } => write!(f, "Auth error: {}", message),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::Validation { message } => write!(f, "Validation error: {}", message),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Maps a status or portal error code to an error.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let message = message.into();
        match status {
            401 | 403 | 498 | 499 => ApiError::Auth {
                message: if message.is_empty() {
                    "Authentication failed".to_string()
                } else {
                    message
                },
            },
            429 => ApiError::RateLimit { retry_after },
            400 => ApiError::Validation {
                message: if message.is_empty() {
                    "Bad request".to_string()
                } else {
                    message
                },
            },
            _ => ApiError::Http { status, message },
        }
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Network { .. } => 3,
            ApiError::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The portal returned an error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// No search endpoint was resolved for the query.
    #[error("no search endpoint configured")]
    MissingEndpoint,

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),

    /// The query could not be form-encoded.
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl Error {
    /// Returns the API error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(e) => e.exit_code(),
            Error::Http(_) => 3,
            _ => 2,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

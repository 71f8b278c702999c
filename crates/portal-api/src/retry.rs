//! Retry logic for search requests with exponential backoff.

use std::time::Duration;

use serde_json::Value;

use crate::error::{ApiError, Error, Result};
use crate::search::{PortalErrorBody, SearchResponse};

/// Default initial backoff duration for retries (1 second).
pub(crate) const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

/// Default maximum backoff duration for retries (30 seconds).
pub(crate) const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;

/// Default maximum number of retry attempts.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub(crate) struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// Calculates the backoff duration for a retry attempt.
    ///
    /// A `Retry-After` value wins when present. Otherwise the backoff is
    /// `initial * 2^attempt`. Both are capped at `max_backoff`.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let backoff = match retry_after {
            Some(secs) => Duration::from_secs(secs),
            None => self
                .initial_backoff
                .saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX)),
        };
        backoff.min(self.max_backoff)
    }
}

/// Decision type for retry logic.
pub(crate) enum RetryDecision<T> {
    Success(T),
    Retry { retry_after: Option<u64> },
}

/// Turns a search response into a retry decision or an error.
pub(crate) async fn handle_search_response(
    response: reqwest::Response,
    attempt: u32,
    max_retries: u32,
) -> Result<RetryDecision<SearchResponse>> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status.as_u16() == 429 && attempt < max_retries {
        return Ok(RetryDecision::Retry { retry_after });
    }

    let body = response.text().await?;

    if !status.is_success() {
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            body
        };
        return Err(ApiError::from_status(status.as_u16(), message, retry_after).into());
    }

    let value: Value = serde_json::from_str(&body)?;
    if let Some(error) = value.get("error") {
        let error: PortalErrorBody = serde_json::from_value(error.clone())?;
        if error.code == 429 && attempt < max_retries {
            return Ok(RetryDecision::Retry { retry_after });
        }
        return Err(ApiError::from_status(error.code, error.message, retry_after).into());
    }

    Ok(RetryDecision::Success(serde_json::from_value(value)?))
}

/// Maps a transport failure to an error, classifying connection problems.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() {
        ApiError::Network {
            message: err.to_string(),
        }
        .into()
    } else {
        Error::Http(err)
    }
}

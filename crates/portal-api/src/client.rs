//! HTTP client for the portal search endpoint.

use std::fmt;
use std::time::Duration;

use tokio::time::sleep;

use search_query_rs::params::CompiledQuery;

use crate::error::{Error, Result};
use crate::retry::{handle_search_response, transport_error, RetryConfig, RetryDecision};
use crate::search::{SearchForm, SearchResponse};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client that executes compiled queries against a portal.
///
/// The endpoint and credential come from each [`CompiledQuery`], so one
/// client can serve several portals.
#[derive(Clone)]
pub struct PortalClient {
    http_client: reqwest::Client,
    retry: RetryConfig,
}

/// Builder for [`PortalClient`].
#[derive(Debug, Clone)]
pub struct PortalClientBuilder {
    timeout: Duration,
    retry: RetryConfig,
}

impl Default for PortalClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

impl PortalClientBuilder {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of retries on rate limiting.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Sets the initial backoff between retries.
    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.retry.initial_backoff = backoff;
        self
    }

    /// Sets the maximum backoff between retries.
    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.retry.max_backoff = backoff;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<PortalClient> {
        let http_client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(PortalClient {
            http_client,
            retry: self.retry,
        })
    }
}

impl PortalClient {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Returns a builder for configuring the client.
    pub fn builder() -> PortalClientBuilder {
        PortalClientBuilder::default()
    }

    /// Executes a compiled query.
    ///
    /// Rate-limited requests are retried with exponential backoff.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] if the query has no endpoint.
    pub async fn search(&self, query: &CompiledQuery) -> Result<SearchResponse> {
        let endpoint = query.endpoint.as_deref().ok_or(Error::MissingEndpoint)?;
        let url = format!("{}/search", endpoint.trim_end_matches('/'));
        let body = serde_urlencoded::to_string(SearchForm::from(query))?;

        let mut attempt = 0;
        loop {
            tracing::debug!(
                url = %url,
                attempt,
                start = query.params.start,
                "sending search request"
            );

            let response = self
                .http_client
                .post(&url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body.clone())
                .send()
                .await
                .map_err(transport_error)?;

            match handle_search_response(response, attempt, self.retry.max_retries).await? {
                RetryDecision::Success(result) => return Ok(result),
                RetryDecision::Retry { retry_after } => {
                    let backoff = self.retry.calculate_backoff(attempt, retry_after);
                    tracing::debug!(?backoff, attempt, "rate limited, retrying");
                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalClient")
            .field("http_client", &self.http_client)
            .field("retry", &self.retry)
            .finish()
    }
}

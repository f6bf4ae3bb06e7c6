//! Search-engine HTTP client.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Recency;

/// Production search endpoint.
const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Browser-like identification; the result page served to unknown agents is
/// stripped of organic results.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Result-count hint sent with every query.
const RESULT_COUNT_HINT: &str = "20";

/// Errors from a single search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure: DNS, connect, TLS, timeout, or body read.
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("search returned status {0}")]
    Status(StatusCode),
}

/// Anything that can fetch raw search-result HTML for a query.
///
/// The pipeline depends on this trait rather than a concrete client so a
/// full cycle can be driven from canned pages in tests.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch the raw result page for `query` within the given recency window.
    async fn search(&self, query: &str, recency: Recency) -> Result<String, SearchError>;
}

/// Search client backed by Google's HTML results page.
pub struct GoogleSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleSearchClient {
    /// Create a client pointed at the production endpoint.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Point the client at a different endpoint (integration tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchClient for GoogleSearchClient {
    async fn search(&self, query: &str, recency: Recency) -> Result<String, SearchError> {
        let recency_param = format!("qdr:{}", recency.code());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("num", RESULT_COUNT_HINT),
                ("hl", "en"),
                ("tbs", recency_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let html = response.text().await?;
        tracing::debug!(bytes = html.len(), "Fetched search result page");
        Ok(html)
    }
}

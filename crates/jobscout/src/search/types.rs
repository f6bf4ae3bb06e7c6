//! Search result value types.

use serde::{Deserialize, Serialize};

/// A single job posting pulled out of a search-result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Link text, used as the posting title.
    pub title: String,
    /// Destination URL.
    pub url: String,
    /// Posting host with any leading `www.` stripped.
    pub domain: String,
}

impl JobResult {
    /// Create a new job result.
    #[must_use]
    pub const fn new(title: String, url: String, domain: String) -> Self {
        Self { title, url, domain }
    }

    /// Placeholder entry surfacing a failed region fetch inside the digest.
    ///
    /// The region and error text go into the title; url and domain stay empty.
    #[must_use]
    pub fn error_marker(region: &str, error: &str) -> Self {
        Self {
            title: format!("[Error fetching results for {region}: {error}]"),
            url: String::new(),
            domain: String::new(),
        }
    }

    /// Key used for per-run deduplication.
    ///
    /// Two results count as duplicates when their domain and lowercased title
    /// match; differing URLs alone do not make results distinct.
    #[must_use]
    pub fn dedup_key(&self) -> (String, String) {
        (self.domain.clone(), self.title.to_lowercase())
    }
}

//! Search pipeline orchestration.
//!
//! Drives one query per region, pools the extracted results, then dedupes
//! and caps them into the final digest list.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::search::{JobResult, ResultExtractor, SearchClient};

/// Outcome of one full search cycle across all regions.
#[derive(Debug, Default)]
pub struct SearchCycleResult {
    /// Final digest entries after dedup and capping.
    pub results: Vec<JobResult>,
    /// Entries collected before dedup, error markers included.
    pub fetched: usize,
    /// Entries removed as duplicates.
    pub duplicates: usize,
    /// Entries dropped by the result cap.
    pub truncated: usize,
    /// Per-region failure descriptions, also present as error markers.
    pub errors: Vec<String>,
}

/// Runs the full fetch-extract-dedupe-cap cycle.
pub struct Pipeline {
    settings: Settings,
    client: Arc<dyn SearchClient>,
}

impl Pipeline {
    /// Create a new pipeline.
    #[must_use]
    pub fn new(settings: Settings, client: Arc<dyn SearchClient>) -> Self {
        Self { settings, client }
    }

    /// Run one search cycle across all configured regions.
    ///
    /// A region failure never aborts the cycle: it becomes one error-marker
    /// entry plus an entry in `errors`, and the remaining regions still run.
    pub async fn search_cycle(&self) -> SearchCycleResult {
        let mut cycle = SearchCycleResult::default();
        let mut collected = Vec::new();

        tracing::info!(
            regions = self.settings.regions.len(),
            recency = %self.settings.recency,
            "Starting search cycle"
        );

        for region in &self.settings.regions {
            let query = self.build_query(region);
            tracing::debug!(region = %region, query = %query, "Querying region");

            match self.client.search(&query, self.settings.recency).await {
                Ok(html) => {
                    let items = ResultExtractor::extract(&html, &self.settings.sites);
                    tracing::info!(region = %region, count = items.len(), "Region fetch complete");
                    collected.extend(items);
                }
                Err(e) => {
                    tracing::warn!(region = %region, error = %e, "Region fetch failed");
                    cycle.errors.push(format!("{region}: {e}"));
                    collected.push(JobResult::error_marker(region, &e.to_string()));
                }
            }

            // Politeness pause between queries; runs after the last region too
            tokio::time::sleep(Duration::from_secs_f64(self.settings.pause_seconds)).await;
        }

        cycle.fetched = collected.len();

        let deduped = dedupe(collected);
        cycle.duplicates = cycle.fetched - deduped.len();

        let mut results = deduped;
        if results.len() > self.settings.results_limit {
            cycle.truncated = results.len() - self.settings.results_limit;
            results.truncate(self.settings.results_limit);
        }
        cycle.results = results;

        tracing::info!(
            fetched = cycle.fetched,
            kept = cycle.results.len(),
            duplicates = cycle.duplicates,
            truncated = cycle.truncated,
            errors = cycle.errors.len(),
            "Search cycle complete"
        );

        cycle
    }

    /// Combined query for one region: base query, site restriction, region phrase.
    fn build_query(&self, region: &str) -> String {
        format!(
            "{} site:({}) \"{}\"",
            self.settings.query,
            self.settings.sites.join(" OR "),
            region
        )
    }
}

/// Drop duplicate results, keeping the first occurrence in order.
fn dedupe(results: Vec<JobResult>) -> Vec<JobResult> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for result in results {
        if seen.insert(result.dedup_key()) {
            unique.push(result);
        }
    }
    unique
}

//! Job result extraction from search-result HTML.

use scraper::{Html, Selector};
use url::Url;

use super::types::JobResult;

/// Minimum link-text length for a plausible posting title.
const MIN_TITLE_CHARS: usize = 12;

/// URL fragments that mark cache mirrors and policy pages, never postings.
const NOISE_URL_FRAGMENTS: &[&str] = &["webcache.googleusercontent.com", "/policies"];

/// Extracts job results from raw search-result pages.
pub struct ResultExtractor;

impl ResultExtractor {
    /// Extract candidate postings from a result page, in document order.
    ///
    /// An anchor survives when its resolved URL is HTTP(S), its domain
    /// contains one of the allowed site fragments, the URL is not a cache or
    /// policy link, and the link text is long enough to be a title. Anchors
    /// that fail any check are dropped silently; a page that matches nothing
    /// yields an empty list, not an error.
    #[must_use]
    pub fn extract(html: &str, allowed_sites: &[String]) -> Vec<JobResult> {
        let document = Html::parse_document(html);
        let anchor_selector = Selector::parse("a").expect("Invalid anchor selector");

        let mut results = Vec::new();

        for anchor in document.select(&anchor_selector) {
            let href = anchor.value().attr("href").unwrap_or_default();
            // Titles often span nested elements; join fragments with a space
            // so sibling text nodes keep their word break
            let title = collapse_whitespace(&anchor.text().collect::<Vec<_>>().join(" "));

            let url = Self::resolve_redirect(href);
            if !url.starts_with("http") {
                continue;
            }

            let Some(domain) = Self::domain_of(&url) else {
                continue;
            };
            if !allowed_sites.iter().any(|site| domain.contains(site.as_str())) {
                continue;
            }

            if NOISE_URL_FRAGMENTS.iter().any(|fragment| url.contains(fragment)) {
                continue;
            }

            if title.chars().count() < MIN_TITLE_CHARS {
                continue;
            }

            results.push(JobResult::new(title, url, domain));
        }

        tracing::debug!(count = results.len(), "Extracted results from page");
        results
    }

    /// Resolve an indirect `/url?q=...` redirect href to its destination.
    ///
    /// Result pages wrap destinations in a redirect path whose `q` query
    /// parameter carries the percent-encoded real URL. Anything else passes
    /// through unchanged.
    fn resolve_redirect(href: &str) -> String {
        if let Some(query) = href.strip_prefix("/url?") {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                if key == "q" {
                    return value.into_owned();
                }
            }
        }
        href.to_string()
    }

    /// The URL host with a leading `www.` stripped, or `None` when the URL
    /// does not parse to something with a host.
    fn domain_of(url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        let host = host.strip_prefix("www.").unwrap_or(host);
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }
}

/// Collapse runs of whitespace in anchor text to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

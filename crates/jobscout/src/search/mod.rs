//! Job search module.
//!
//! Provides the search-engine client and result extraction.

mod client;
mod extract;
mod types;

pub use client::{GoogleSearchClient, SearchClient, SearchError};
pub use extract::ResultExtractor;
pub use types::JobResult;

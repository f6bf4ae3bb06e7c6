//! Jobscout crate for job posting search and digest delivery.
//!
//! This crate provides:
//! - Per-region web search for job postings with recency windows
//! - Result extraction from search HTML with site allowlisting
//! - Cross-region pooling with dedup and capping
//! - HTML and plain-text digest rendering grouped by domain
//! - Digest delivery over SMTPS

pub mod config;
pub mod digest;
pub mod pipeline;
pub mod search;

// Re-export main types
pub use config::{Recency, Settings};
pub use digest::{DigestGenerator, EmailSender, SmtpConfig};
pub use pipeline::{Pipeline, SearchCycleResult};
pub use search::{GoogleSearchClient, JobResult, ResultExtractor, SearchClient, SearchError};

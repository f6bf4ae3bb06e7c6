//! Email digest module for job results.
//!
//! Renders the per-domain summary and delivers it over SMTPS.

mod config;
mod email;
mod generator;

pub use config::SmtpConfig;
pub use email::EmailSender;
pub use generator::DigestGenerator;

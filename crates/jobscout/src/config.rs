//! Run configuration loaded from the process environment.

use anyhow::{Context, Result};

use crate::digest::SmtpConfig;

/// Default base search query.
pub const DEFAULT_QUERY: &str = r#"("Planning Engineer" OR "Project Planning Engineer")"#;

/// Default comma-separated region list.
pub const DEFAULT_REGIONS: &str = "Saudi Arabia,Remote";

/// Default comma-separated allowed job sites.
pub const DEFAULT_SITES: &str = "linkedin.com/jobs,indeed.com,bayt.com,gulftalent.com,glassdoor.com";

/// Default cap on results kept per digest.
pub const DEFAULT_RESULTS_LIMIT: usize = 40;

/// Default pause between region queries, in seconds.
pub const DEFAULT_PAUSE_SECONDS: f64 = 1.0;

/// How far back the search engine should look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recency {
    /// Past hour (`h`).
    Hour,
    /// Past day (`d`).
    #[default]
    Day,
    /// Past week (`w`).
    Week,
    /// Past month (`m`).
    Month,
}

impl Recency {
    /// Parse a single-letter recency code (`h`, `d`, `w`, `m`).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            "w" => Some(Self::Week),
            "m" => Some(Self::Month),
            _ => None,
        }
    }

    /// The single-letter code used in search requests and the digest footer.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "m",
        }
    }
}

impl std::fmt::Display for Recency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable snapshot of one run's parameters.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base search query text.
    pub query: String,
    /// Regions to search, one query each.
    pub regions: Vec<String>,
    /// Allowed job-site domain fragments.
    pub sites: Vec<String>,
    /// Maximum results kept in the digest.
    pub results_limit: usize,
    /// Pause between region queries, in seconds.
    pub pause_seconds: f64,
    /// Recency window applied to every search request.
    pub recency: Recency,
    /// SMTP delivery settings.
    pub smtp: SmtpConfig,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Required Environment Variables
    /// - `EMAIL_USER`: sender address, also the SMTP login
    /// - `EMAIL_PASS`: SMTP password (e.g. a Gmail app password)
    /// - `EMAIL_RECEIVER`: digest recipient address
    ///
    /// # Optional Environment Variables
    /// - `JOB_QUERY`: base search query
    /// - `JOB_REGIONS`: comma-separated regions (default: "Saudi Arabia,Remote")
    /// - `JOB_SITES`: comma-separated allowed job sites
    /// - `RESULTS_LIMIT`: digest cap (default: 40)
    /// - `PAUSE_SECONDS`: pause between region queries (default: 1.0)
    /// - `TIME_FILTER`: recency code `h`/`d`/`w`/`m` (default: `d`)
    /// - `SMTP_HOST`, `SMTP_PORT`: relay endpoint (default: smtp.gmail.com:465)
    pub fn from_env() -> Result<Self> {
        let query = std::env::var("JOB_QUERY").unwrap_or_else(|_| DEFAULT_QUERY.to_string());

        let regions =
            split_list(&std::env::var("JOB_REGIONS").unwrap_or_else(|_| DEFAULT_REGIONS.to_string()));
        let sites =
            split_list(&std::env::var("JOB_SITES").unwrap_or_else(|_| DEFAULT_SITES.to_string()));

        let results_limit = match std::env::var("RESULTS_LIMIT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("RESULTS_LIMIT is not a valid integer: {raw}"))?,
            Err(_) => DEFAULT_RESULTS_LIMIT,
        };

        let pause_seconds = match std::env::var("PAUSE_SECONDS") {
            Ok(raw) => {
                let parsed: f64 = raw
                    .parse()
                    .with_context(|| format!("PAUSE_SECONDS is not a valid number: {raw}"))?;
                // Feeds Duration::from_secs_f64, which panics on these
                if !parsed.is_finite() || parsed < 0.0 {
                    anyhow::bail!(
                        "PAUSE_SECONDS must be a non-negative finite number (got: {raw})"
                    );
                }
                parsed
            }
            Err(_) => DEFAULT_PAUSE_SECONDS,
        };

        let recency = match std::env::var("TIME_FILTER") {
            Ok(raw) => Recency::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!("TIME_FILTER must be one of h, d, w, m (got: {raw})")
            })?,
            Err(_) => Recency::default(),
        };

        let smtp = SmtpConfig::from_env()?;

        Ok(Self {
            query,
            regions,
            sites,
            results_limit,
            pause_seconds,
            recency,
            smtp,
        })
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: &[&str] = &[
        "JOB_QUERY",
        "JOB_REGIONS",
        "JOB_SITES",
        "RESULTS_LIMIT",
        "PAUSE_SECONDS",
        "TIME_FILTER",
        "SMTP_HOST",
        "SMTP_PORT",
        "EMAIL_USER",
        "EMAIL_PASS",
        "EMAIL_RECEIVER",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    fn set_required_env() {
        env::set_var("EMAIL_USER", "jobs@example.com");
        env::set_var("EMAIL_PASS", "app-password");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");
    }

    #[test]
    fn test_recency_parse() {
        assert_eq!(Recency::parse("h"), Some(Recency::Hour));
        assert_eq!(Recency::parse("d"), Some(Recency::Day));
        assert_eq!(Recency::parse("w"), Some(Recency::Week));
        assert_eq!(Recency::parse("m"), Some(Recency::Month));
        assert_eq!(Recency::parse("y"), None);
        assert_eq!(Recency::parse(""), None);
        assert_eq!(Recency::parse("D"), None);
    }

    #[test]
    fn test_recency_code_round_trips() {
        for recency in [Recency::Hour, Recency::Day, Recency::Week, Recency::Month] {
            assert_eq!(Recency::parse(recency.code()), Some(recency));
        }
    }

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" Saudi Arabia , Remote ,, "),
            vec!["Saudi Arabia".to_string(), "Remote".to_string()]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required_env();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.query, DEFAULT_QUERY);
        assert_eq!(settings.regions, vec!["Saudi Arabia", "Remote"]);
        assert_eq!(
            settings.sites,
            vec![
                "linkedin.com/jobs",
                "indeed.com",
                "bayt.com",
                "gulftalent.com",
                "glassdoor.com"
            ]
        );
        assert_eq!(settings.results_limit, DEFAULT_RESULTS_LIMIT);
        assert!((settings.pause_seconds - DEFAULT_PAUSE_SECONDS).abs() < f64::EPSILON);
        assert_eq!(settings.recency, Recency::Day);
        assert_eq!(settings.smtp.username, "jobs@example.com");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        set_required_env();
        env::set_var("JOB_QUERY", "\"Site Engineer\"");
        env::set_var("JOB_REGIONS", " Remote , Europe ");
        env::set_var("JOB_SITES", "bayt.com");
        env::set_var("RESULTS_LIMIT", "5");
        env::set_var("PAUSE_SECONDS", "0.25");
        env::set_var("TIME_FILTER", "w");

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.query, "\"Site Engineer\"");
        assert_eq!(settings.regions, vec!["Remote", "Europe"]);
        assert_eq!(settings.sites, vec!["bayt.com"]);
        assert_eq!(settings.results_limit, 5);
        assert!((settings.pause_seconds - 0.25).abs() < f64::EPSILON);
        assert_eq!(settings.recency, Recency::Week);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_email_user_fails() {
        clear_env();
        env::set_var("EMAIL_PASS", "app-password");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");

        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("EMAIL_USER"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_results_limit() {
        clear_env();
        set_required_env();
        env::set_var("RESULTS_LIMIT", "forty");

        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("RESULTS_LIMIT"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_negative_or_non_finite_pause() {
        clear_env();
        set_required_env();

        env::set_var("PAUSE_SECONDS", "-1.0");
        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("PAUSE_SECONDS"));

        env::set_var("PAUSE_SECONDS", "NaN");
        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("PAUSE_SECONDS"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_time_filter() {
        clear_env();
        set_required_env();
        env::set_var("TIME_FILTER", "x");

        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("TIME_FILTER"));

        clear_env();
    }
}

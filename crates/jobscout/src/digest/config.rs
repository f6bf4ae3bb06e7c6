//! SMTP delivery configuration.

use anyhow::{Context, Result};

/// Default SMTP relay host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTPS (implicit TLS) port.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Configuration for digest delivery.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Sender address, also the SMTP login.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Digest recipient address.
    pub recipient: String,
}

impl SmtpConfig {
    /// Load SMTP settings from environment variables.
    ///
    /// # Required Environment Variables
    /// - `EMAIL_USER`: sender address and SMTP login
    /// - `EMAIL_PASS`: SMTP password (e.g. a Gmail app password)
    /// - `EMAIL_RECEIVER`: recipient address
    ///
    /// # Optional Environment Variables
    /// - `SMTP_HOST`: relay host (default: smtp.gmail.com)
    /// - `SMTP_PORT`: relay port (default: 465)
    pub fn from_env() -> Result<Self> {
        let username =
            std::env::var("EMAIL_USER").context("EMAIL_USER environment variable not set")?;
        let password =
            std::env::var("EMAIL_PASS").context("EMAIL_PASS environment variable not set")?;
        let recipient =
            std::env::var("EMAIL_RECEIVER").context("EMAIL_RECEIVER environment variable not set")?;

        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());
        let port = match std::env::var("SMTP_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SMTP_PORT is not a valid port: {raw}"))?,
            Err(_) => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            host,
            port,
            username,
            password,
            recipient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for var in ["EMAIL_USER", "EMAIL_PASS", "EMAIL_RECEIVER", "SMTP_HOST", "SMTP_PORT"] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_defaults() {
        clear_env();
        env::set_var("EMAIL_USER", "jobs@example.com");
        env::set_var("EMAIL_PASS", "app-password");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");

        let config = SmtpConfig::from_env().unwrap();

        assert_eq!(config.host, DEFAULT_SMTP_HOST);
        assert_eq!(config.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.username, "jobs@example.com");
        assert_eq!(config.recipient, "digest@example.com");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_relay() {
        clear_env();
        env::set_var("EMAIL_USER", "jobs@example.com");
        env::set_var("EMAIL_PASS", "app-password");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");
        env::set_var("SMTP_HOST", "mail.internal.example.com");
        env::set_var("SMTP_PORT", "2465");

        let config = SmtpConfig::from_env().unwrap();

        assert_eq!(config.host, "mail.internal.example.com");
        assert_eq!(config.port, 2465);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_password_fails() {
        clear_env();
        env::set_var("EMAIL_USER", "jobs@example.com");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");

        let err = SmtpConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("EMAIL_PASS"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_port() {
        clear_env();
        env::set_var("EMAIL_USER", "jobs@example.com");
        env::set_var("EMAIL_PASS", "app-password");
        env::set_var("EMAIL_RECEIVER", "digest@example.com");
        env::set_var("SMTP_PORT", "not-a-port");

        let err = SmtpConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SMTP_PORT"));

        clear_env();
    }
}

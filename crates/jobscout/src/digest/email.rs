//! Email sender using SMTPS.

use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::config::SmtpConfig;

/// Email sender for job digests.
pub struct EmailSender {
    config: SmtpConfig,
}

impl EmailSender {
    /// Create a new email sender with the given configuration.
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = SmtpConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Send an email with HTML and plain-text content.
    ///
    /// Delivery uses an implicit-TLS (SMTPS) session. Authentication and
    /// transport failures bubble up to the caller; there is no retry.
    pub async fn send(&self, subject: &str, html_body: &str, text_body: &str) -> Result<()> {
        let email = self.build_message(subject, html_body, text_body)?;

        // Create SMTPS transport (TLS from the first byte, port 465 style)
        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
                .context("Failed to create SMTP transport")?
                .port(self.config.port)
                .credentials(creds)
                .build();

        // Send the email
        mailer
            .send(email)
            .await
            .context("Failed to send email via SMTP")?;

        tracing::info!(
            to = %self.config.recipient,
            subject = subject,
            "Email sent successfully"
        );

        Ok(())
    }

    /// Build the multipart message with both HTML and plain text.
    fn build_message(&self, subject: &str, html_body: &str, text_body: &str) -> Result<Message> {
        let from: Mailbox = self
            .config
            .username
            .parse()
            .context("Invalid sender email address")?;

        let to: Mailbox = self
            .config
            .recipient
            .parse()
            .context("Invalid recipient email address")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .context("Failed to build email message")
    }

    /// Send a simple test email to verify configuration.
    pub async fn send_test(&self) -> Result<()> {
        let subject = "Daily Job Digest - Test Email";
        let html_body = r#"
<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }
        .container { max-width: 600px; margin: 0 auto; }
        h1 { color: #0ea5e9; }
        .success { color: #16a34a; font-weight: bold; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Daily Job Digest</h1>
        <p class="success">Email configuration is working!</p>
        <p>This is a test email from the jobscout pipeline.</p>
        <p>If you're seeing this, SMTP delivery is configured correctly.</p>
    </div>
</body>
</html>
"#;

        let text_body = r"
Daily Job Digest - Test Email

Email configuration is working!

This is a test email from the jobscout pipeline.
If you're seeing this, SMTP delivery is configured correctly.
";

        self.send(subject, html_body, text_body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            username: "jobs@example.com".to_string(),
            password: "app-password".to_string(),
            recipient: "digest@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_message_is_multipart_alternative() {
        let sender = EmailSender::new(test_config());

        let message = sender
            .build_message("Daily Job Digest - 2025-01-15", "<p>digest</p>", "digest")
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: Daily Job Digest - 2025-01-15"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("text/html"));
        assert!(formatted.contains("From: jobs@example.com"));
        assert!(formatted.contains("To: digest@example.com"));
    }

    #[test]
    fn test_build_message_rejects_invalid_recipient() {
        let mut config = test_config();
        config.recipient = "not an address".to_string();
        let sender = EmailSender::new(config);

        let err = sender
            .build_message("Subject", "<p>x</p>", "x")
            .unwrap_err();

        assert!(err.to_string().contains("recipient"));
    }
}

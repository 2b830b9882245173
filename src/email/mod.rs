pub mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Outbound channel for reset links. The only place a raw reset token is
/// allowed to go.
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn send_password_reset(&self, to_email: &str, reset_url: &str) -> Result<(), String>;
}

pub struct SystemMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    reset_ttl_minutes: i64,
}

impl SystemMailer {
    pub fn new(config: &SmtpConfig, reset_ttl_minutes: i64) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("System SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            reset_ttl_minutes,
        })
    }

    fn build(&self, to: &str, subject: &str, html_body: &str) -> Result<Message, String> {
        Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))
    }
}

#[async_trait]
impl ResetNotifier for SystemMailer {
    /// Builds the message inline, then hands the SMTP round-trip to a
    /// background task so known and unknown emails answer equally fast.
    async fn send_password_reset(&self, to_email: &str, reset_url: &str) -> Result<(), String> {
        let html = templates::render_password_reset(reset_url, self.reset_ttl_minutes);
        let message = self.build(to_email, "Password Reset - CollegeHub", &html)?;
        let transport = self.transport.clone();

        tokio::spawn(async move {
            if let Err(e) = transport.send(message).await {
                tracing::error!("Failed to send password reset email: {e}");
            }
        });

        Ok(())
    }
}

/// Used when SMTP is not configured. Nothing is delivered.
pub struct LogNotifier;

#[async_trait]
impl ResetNotifier for LogNotifier {
    async fn send_password_reset(&self, to_email: &str, reset_url: &str) -> Result<(), String> {
        if cfg!(feature = "dev-reset-token") {
            tracing::warn!("System SMTP not configured. Reset link for {to_email}: {reset_url}");
        } else {
            tracing::warn!("System SMTP not configured. Password reset email for {to_email} was not sent");
        }
        Ok(())
    }
}

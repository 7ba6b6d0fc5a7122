//! Outbound mail: the transport seam and its SMTP implementation.

use crate::config::MailSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

/// A fully composed notification email, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Anything that can deliver an [`OutgoingMail`].
///
/// Shared across requests behind an `Arc`; implementations must be safe for
/// concurrent use.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// SMTP delivery through lettre's async transport, one connection per message.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer from settings.
    ///
    /// Returns `Ok(None)` when no server is configured or there is no address
    /// to send from (neither `MAIL_DEFAULT_SENDER` nor `MAIL_USERNAME`).
    pub fn from_settings(settings: &MailSettings) -> Result<Option<Self>> {
        let Some(host) = settings.server.as_deref() else {
            return Ok(None);
        };
        let Some(sender) = settings.sender() else {
            return Ok(None);
        };
        let sender: Mailbox = sender
            .parse()
            .with_context(|| format!("invalid sender address {sender:?}"))?;

        let mut builder = if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .with_context(|| format!("invalid SMTP host {host:?}"))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        builder = builder
            .port(settings.port)
            .timeout(Some(Duration::from_secs(settings.timeout_secs)));
        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        info!(host, port = settings.port, tls = settings.use_tls, "SMTP transport configured");
        Ok(Some(Self {
            transport: builder.build(),
            sender,
        }))
    }

    fn compose(&self, mail: &OutgoingMail) -> Result<Message> {
        let to: Mailbox = mail
            .to
            .parse()
            .with_context(|| format!("invalid recipient address {:?}", mail.to))?;
        let reply_to: Mailbox = mail
            .reply_to
            .parse()
            .with_context(|| format!("invalid reply-to address {:?}", mail.reply_to))?;
        Message::builder()
            .from(self.sender.clone())
            .reply_to(reply_to)
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .context("failed to build message")
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = self.compose(mail)?;
        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;
        Ok(())
    }
}

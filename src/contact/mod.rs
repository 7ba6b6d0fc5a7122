//! # Contact — Form Validation and Notification Email
//!
//! ```text
//! Received ──validate──> Validated ──config check──> send ──> Sent
//!     │                      │                        │
//!     └─> ValidationFailed   └─> ConfigError          └─> SendFailed
//! ```
//!
//! Every state after `Received` is terminal. At most one email leaves per
//! submission and failures are never retried; the visitor resubmits.
//!
//! Only [`ContactOutcome::ValidationFailed`] carries text meant for the
//! visitor. Configuration and transport failures are logged here and reported
//! to the client with a fixed generic message.

mod form;
mod mailer;

pub use form::*;
pub use mailer::*;

use std::sync::Arc;
use tracing::{error, info};

/// Terminal state of one submission.
#[derive(Debug)]
pub enum ContactOutcome {
    Sent,
    ValidationFailed(ValidationError),
    ConfigError,
    SendFailed(anyhow::Error),
}

impl ContactOutcome {
    /// Text returned to the visitor.
    pub fn client_message(&self) -> String {
        match self {
            ContactOutcome::Sent => "Message sent successfully!".to_string(),
            ContactOutcome::ValidationFailed(e) => e.to_string(),
            ContactOutcome::ConfigError => {
                "System configuration error. Please try again later.".to_string()
            }
            ContactOutcome::SendFailed(_) => {
                "Failed to send email. Please try again later.".to_string()
            }
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ContactOutcome::Sent => "sent",
            ContactOutcome::ValidationFailed(_) => "invalid",
            ContactOutcome::ConfigError => "config_error",
            ContactOutcome::SendFailed(_) => "send_failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ContactOutcome::Sent)
    }
}

/// Validates submissions and dispatches the notification email.
#[derive(Clone, Default)]
pub struct ContactPipeline {
    recipient: Option<String>,
    transport: Option<Arc<dyn MailTransport>>,
}

impl ContactPipeline {
    pub fn new(recipient: Option<String>, transport: Option<Arc<dyn MailTransport>>) -> Self {
        Self {
            recipient,
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.recipient.is_some() && self.transport.is_some()
    }

    pub async fn submit(&self, form: &ContactForm) -> ContactOutcome {
        let submission = match validate(form) {
            Ok(s) => s,
            Err(e) => return ContactOutcome::ValidationFailed(e),
        };

        let (Some(recipient), Some(transport)) = (&self.recipient, &self.transport) else {
            error!(
                has_recipient = self.recipient.is_some(),
                has_transport = self.transport.is_some(),
                "mail configuration missing"
            );
            return ContactOutcome::ConfigError;
        };

        let mail = compose(&submission, recipient);
        match transport.send(&mail).await {
            Ok(()) => {
                info!(reply_to = %submission.email, "contact email sent");
                ContactOutcome::Sent
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "failed to send contact email");
                ContactOutcome::SendFailed(e)
            }
        }
    }
}

/// Fixed plain-text layout of the notification email.
pub fn compose(submission: &ValidSubmission, recipient: &str) -> OutgoingMail {
    OutgoingMail {
        to: recipient.to_string(),
        reply_to: submission.email.clone(),
        subject: format!("Portfolio Contact from {}", submission.name),
        body: format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            submission.name, submission.email, submission.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    fn pipeline(transport: &Arc<RecordingTransport>) -> ContactPipeline {
        ContactPipeline::new(
            Some("owner@example.com".into()),
            Some(transport.clone() as Arc<dyn MailTransport>),
        )
    }

    #[tokio::test]
    async fn valid_submission_sends_one_email() {
        let transport = Arc::new(RecordingTransport::default());
        let outcome = pipeline(&transport)
            .submit(&ContactForm::new(
                "Jane",
                "jane@example.com",
                "Hello, I love your portfolio!",
            ))
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.client_message(), "Message sent successfully!");
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "jane@example.com");
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "Portfolio Contact from Jane");
        assert_eq!(
            sent[0].body,
            "Name: Jane\nEmail: jane@example.com\n\nMessage:\nHello, I love your portfolio!"
        );
    }

    #[tokio::test]
    async fn invalid_submission_sends_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        let outcome = pipeline(&transport)
            .submit(&ContactForm::new("Jane", "jane@example.com", "Hi"))
            .await;

        assert!(matches!(
            outcome,
            ContactOutcome::ValidationFailed(ValidationError::TooShort(Field::Message))
        ));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_runs_before_config_check() {
        let outcome = ContactPipeline::default()
            .submit(&ContactForm::new("", "", ""))
            .await;
        assert!(matches!(outcome, ContactOutcome::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn missing_recipient_is_config_error() {
        let transport = Arc::new(RecordingTransport::default());
        let pipeline = ContactPipeline::new(None, Some(transport.clone() as Arc<dyn MailTransport>));
        let outcome = pipeline
            .submit(&ContactForm::new("Jane", "jane@example.com", "A long enough message"))
            .await;

        assert!(matches!(outcome, ContactOutcome::ConfigError));
        assert_eq!(
            outcome.client_message(),
            "System configuration error. Please try again later."
        );
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_transport_is_config_error() {
        let pipeline = ContactPipeline::new(Some("owner@example.com".into()), None);
        assert!(!pipeline.is_configured());
        let outcome = pipeline
            .submit(&ContactForm::new("Jane", "jane@example.com", "A long enough message"))
            .await;
        assert!(matches!(outcome, ContactOutcome::ConfigError));
    }

    #[tokio::test]
    async fn transport_failure_hides_details_from_client() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let outcome = pipeline(&transport)
            .submit(&ContactForm::new("Jane", "jane@example.com", "A long enough message"))
            .await;

        assert_eq!(outcome.label(), "send_failed");
        let message = outcome.client_message();
        assert_eq!(message, "Failed to send email. Please try again later.");
        assert!(!message.contains("refused"));
    }
}

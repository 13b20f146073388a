use std::sync::Arc;

use lettre::Message;

use crate::app::{config::Config, domain::ContactSubmission};

/// Outcome of a successful send, by path taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the SMTP server. Holds the server's response text.
    Queued(String),
    /// Not transmitted. Holds the rendered message that was logged instead.
    Buffered(String),
}

/// Abstract interface for a mail transport. Swappable for tests.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check connectivity and authentication.
    async fn verify(&self) -> Result<(), MailError>;

    /// Deliver a composed message.
    async fn send(&self, message: Message) -> Result<Delivery, MailError>;

    /// Identity the transport authenticates as, if any.
    fn identity(&self) -> Option<&str> {
        None
    }
}

/// Produces a transport for a single request. Called once per dispatch.
#[async_trait::async_trait]
pub trait TransportResolver: Send + Sync {
    async fn resolve(&self) -> Result<Box<dyn MailTransport>, MailError>;
}

/// Errors that can occur while composing or sending mail.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("Failed to build email message: {0}")]
    Build(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
}

// Re-export implementations
pub use compose::compose;
pub use console::DiscardTransport;
pub use smtp::{NetworkTransport, SmtpResolver};

mod compose;
mod console;
mod smtp;

/// Verify `primary` and use it, or fall back to a [`DiscardTransport`] when
/// verification fails. Only the verify step is guarded.
pub async fn resolve_transport(primary: Box<dyn MailTransport>) -> Box<dyn MailTransport> {
    match primary.verify().await {
        Ok(()) => {
            let identity = primary.identity().map(mask_identity);
            tracing::info!(
                transport = primary.name(),
                user = identity.as_deref().unwrap_or("-"),
                "Mail transport verified"
            );
            primary
        }
        Err(err) => {
            tracing::warn!(
                transport = primary.name(),
                reason = %err,
                "Mail transport verify failed, falling back to discard transport"
            );
            Box::new(DiscardTransport::new())
        }
    }
}

/// Mask all but the last three characters of an account identity.
pub fn mask_identity(identity: &str) -> String {
    let count = identity.chars().count();
    let keep_from = count.saturating_sub(3);
    identity
        .chars()
        .enumerate()
        .map(|(i, c)| if i < keep_from { '*' } else { c })
        .collect()
}

/// Compose, resolve a transport, and send. Send failures propagate.
pub async fn dispatch(
    resolver: &Arc<dyn TransportResolver>,
    config: &Config,
    submission: &ContactSubmission,
) -> Result<Delivery, MailError> {
    let message = compose(config, submission)?;
    let transport = resolver.resolve().await?;
    let delivery = transport.send(message).await?;

    match &delivery {
        Delivery::Queued(id) => {
            tracing::info!(transport = transport.name(), response = %id, "Contact email sent")
        }
        Delivery::Buffered(content) => {
            tracing::info!(transport = transport.name(), %content, "Contact email buffered")
        }
    }

    Ok(delivery)
}

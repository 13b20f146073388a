use async_trait::async_trait;
use lettre::Message;

use super::{Delivery, MailError, MailTransport};

/// Discard transport used when SMTP is unavailable.
/// Renders the message into memory and logs it instead of sending.
#[derive(Debug, Default)]
pub struct DiscardTransport;

impl DiscardTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for DiscardTransport {
    fn name(&self) -> &'static str {
        "discard"
    }

    async fn verify(&self) -> Result<(), MailError> {
        Ok(())
    }

    async fn send(&self, message: Message) -> Result<Delivery, MailError> {
        let content = String::from_utf8_lossy(&message.formatted()).into_owned();
        tracing::info!(
            bytes = content.len(),
            "Email discarded (console)"
        );
        Ok(Delivery::Buffered(content))
    }
}

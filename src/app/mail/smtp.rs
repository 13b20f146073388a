use async_trait::async_trait;
use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{resolve_transport, Delivery, MailError, MailTransport, TransportResolver};
use crate::app::config::SmtpSettings;

/// Port that expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP transport for real delivery.
#[derive(Debug)]
pub struct NetworkTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    user: Option<String>,
}

/// Implicit TLS on 465, opportunistic STARTTLS everywhere else.
fn tls_for(port: u16, params: TlsParameters) -> Tls {
    if port == IMPLICIT_TLS_PORT {
        Tls::Wrapper(params)
    } else {
        Tls::Opportunistic(params)
    }
}

impl NetworkTransport {
    /// Create a new SMTP transport.
    ///
    /// # Arguments
    /// * `host` - SMTP server hostname
    /// * `port` - 465 for implicit TLS, anything else uses opportunistic STARTTLS
    /// * `user` - SMTP username (optional for some servers)
    /// * `pass` - SMTP password (optional for some servers)
    pub fn new(
        host: &str,
        port: u16,
        user: Option<String>,
        pass: Option<String>,
    ) -> Result<Self, MailError> {
        let params = TlsParameters::new(host.to_string())
            .map_err(|e| MailError::Config(format!("Invalid TLS parameters for '{}': {}", host, e)))?;
        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .tls(tls_for(port, params));

        // Add authentication if provided
        let user = match (user, pass) {
            (Some(user), Some(pass)) => {
                transport = transport.credentials(Credentials::new(user.clone(), pass));
                Some(user)
            }
            _ => None,
        };

        Ok(Self {
            transport: transport.build(),
            user,
        })
    }
}

#[async_trait]
impl MailTransport for NetworkTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn verify(&self) -> Result<(), MailError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Smtp("SMTP server did not accept NOOP".to_string())),
            Err(e) => Err(MailError::Smtp(format!("SMTP verify failed: {}", e))),
        }
    }

    async fn send(&self, message: Message) -> Result<Delivery, MailError> {
        let response = AsyncTransport::send(&self.transport, message)
            .await
            .map_err(|e| MailError::Smtp(format!("SMTP send failed: {}", e)))?;

        let text = response.message().collect::<Vec<_>>().join(" ");
        Ok(Delivery::Queued(format!("{} {}", response.code(), text)))
    }

    fn identity(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Builds a fresh SMTP transport from settings on every request.
#[derive(Debug, Clone)]
pub struct SmtpResolver {
    settings: SmtpSettings,
}

impl SmtpResolver {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

/// Stand-in primary transport when no SMTP host is configured.
/// Always fails verification so the resolver falls back.
struct Unconfigured;

#[async_trait]
impl MailTransport for Unconfigured {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn verify(&self) -> Result<(), MailError> {
        Err(MailError::Config("SMTP_HOST is not set".to_string()))
    }

    // Unreachable in practice: resolve_transport discards it after the failed verify.
    async fn send(&self, _message: Message) -> Result<Delivery, MailError> {
        Err(MailError::Config("SMTP_HOST is not set".to_string()))
    }
}

#[async_trait]
impl TransportResolver for SmtpResolver {
    async fn resolve(&self) -> Result<Box<dyn MailTransport>, MailError> {
        let primary: Box<dyn MailTransport> = match &self.settings.host {
            Some(host) => Box::new(NetworkTransport::new(
                host,
                self.settings.port,
                self.settings.user.clone(),
                self.settings.pass.clone(),
            )?),
            None => Box::new(Unconfigured),
        };
        Ok(resolve_transport(primary).await)
    }
}

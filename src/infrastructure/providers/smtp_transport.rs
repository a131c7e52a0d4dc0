//! SMTP mail transport
//!
//! Opens one lettre async SMTP session per dispatch run and sends HTML
//! campaign messages through it.
use crate::config::SmtpSettings;
use crate::domain::entities::OutgoingEmail;
use crate::domain::errors::DispatchError;
use crate::domain::ports::mail_transport::{MailTransport, MailTransportFactory};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

type AsyncMailer = AsyncSmtpTransport<Tokio1Executor>;

/// Builds [`SmtpMailTransport`] sessions from environment-provided settings
pub struct SmtpTransportFactory {
    settings: SmtpSettings,
}

impl SmtpTransportFactory {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

impl MailTransportFactory for SmtpTransportFactory {
    fn connect(&self) -> Result<Arc<dyn MailTransport>, DispatchError> {
        let missing = self.settings.missing();
        if !missing.is_empty() {
            return Err(DispatchError::Configuration(format!(
                "set {}",
                missing.join(", ")
            )));
        }

        // All four are present once `missing()` is empty
        let (Some(host), Some(username), Some(password), Some(from_email)) = (
            self.settings.host.as_deref(),
            self.settings.username.clone(),
            self.settings.password.clone(),
            self.settings.from_email.as_deref(),
        ) else {
            return Err(DispatchError::Configuration(
                "incomplete SMTP settings".to_string(),
            ));
        };

        let from: Mailbox = format!("{} <{}>", self.settings.from_name, from_email)
            .parse()
            .map_err(|e| DispatchError::Configuration(format!("invalid sender address: {}", e)))?;

        let creds = Credentials::new(username, password);

        let mailer = if self.settings.use_tls {
            AsyncMailer::starttls_relay(host)
                .map_err(|e| {
                    DispatchError::TransportUnavailable(format!(
                        "failed to create SMTP transport: {}",
                        e
                    ))
                })?
                .port(self.settings.port)
                .credentials(creds)
                .build()
        } else {
            AsyncMailer::builder_dangerous(host)
                .port(self.settings.port)
                .credentials(creds)
                .build()
        };

        tracing::debug!(
            "SMTP session prepared for {}:{} (tls: {})",
            host,
            self.settings.port,
            self.settings.use_tls
        );

        Ok(Arc::new(SmtpMailTransport { mailer, from }))
    }
}

pub struct SmtpMailTransport {
    mailer: AsyncMailer,
    from: Mailbox,
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn verify(&self) -> Result<(), String> {
        match self.mailer.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("SMTP server rejected the connection test".to_string()),
            Err(e) => Err(format!("SMTP connection failed: {}", e)),
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), String> {
        let address = email
            .to
            .parse()
            .map_err(|e| format!("Invalid to address: {}", e))?;
        let to = Mailbox::new(email.to_name.clone(), address);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| format!("Failed to build email: {}", e))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| format!("SMTP send error: {}", e))?;

        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "smtp"
    }
}

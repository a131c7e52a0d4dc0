use crate::domain::entities::OutgoingEmail;
use crate::domain::errors::DispatchError;
use async_trait::async_trait;
use std::sync::Arc;

/// One outbound mail session
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Check that the remote side accepts connections and credentials
    async fn verify(&self) -> Result<(), String>;

    /// Deliver a single message; the error is reported back per recipient
    async fn send(&self, email: &OutgoingEmail) -> Result<(), String>;

    fn transport_name(&self) -> &'static str;
}

/// Opens a fresh [`MailTransport`] for each dispatch run
pub trait MailTransportFactory: Send + Sync {
    fn connect(&self) -> Result<Arc<dyn MailTransport>, DispatchError>;
}

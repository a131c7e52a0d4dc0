use crate::domain::entities::OutgoingEmail;
use crate::domain::errors::DispatchError;
use crate::domain::ports::mail_transport::{MailTransport, MailTransportFactory};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-process transport that records every accepted message.
/// Clones share the same recorded state.
#[derive(Clone, Default)]
pub struct MockMailTransport {
    /// If true, session verification fails
    pub fail_verify: bool,
    /// Recipients whose send is rejected
    failing_recipients: HashSet<String>,
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    connections: Arc<AtomicUsize>,
    send_attempts: Arc<AtomicUsize>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_unverifiable() -> Self {
        Self {
            fail_verify: true,
            ..Self::default()
        }
    }

    pub fn failing_for(mut self, email: &str) -> Self {
        self.failing_recipients.insert(email.to_lowercase());
        self
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn send_attempts(&self) -> usize {
        self.send_attempts.load(Ordering::SeqCst)
    }
}

impl MailTransportFactory for MockMailTransport {
    fn connect(&self) -> Result<Arc<dyn MailTransport>, DispatchError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn verify(&self) -> Result<(), String> {
        if self.fail_verify {
            Err("Mock transport verification failure".to_string())
        } else {
            Ok(())
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), String> {
        self.send_attempts.fetch_add(1, Ordering::SeqCst);

        if self.failing_recipients.contains(&email.to.to_lowercase()) {
            return Err(format!("Mock delivery failure for {}", email.to));
        }

        tracing::debug!("Mock delivery successful to {}", email.to);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

use crate::domain::entities::*;
use crate::domain::errors::DispatchError;
use crate::domain::ports::contact_repository::ContactRepository;
use crate::domain::ports::content_source::CampaignContentSource;
use crate::domain::ports::mail_transport::MailTransportFactory;
use crate::domain::services::render_email;
use std::sync::Arc;

/// Lifecycle of one dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    ValidatingInputs,
    TransportVerification,
    Dispatching { index: usize, total: usize },
    Completed,
    Failed,
}

/// Tracks the current phase and logs each transition
struct PhaseTracker {
    run_id: String,
    phase: DispatchPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            phase: DispatchPhase::Idle,
        }
    }

    fn advance(&mut self, next: DispatchPhase) {
        tracing::debug!(
            run_id = %self.run_id,
            "Dispatch phase {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    fn fail(&mut self, err: DispatchError) -> DispatchError {
        tracing::warn!(run_id = %self.run_id, "Dispatch failed during {:?}: {}", self.phase, err);
        self.advance(DispatchPhase::Failed);
        err
    }
}

/// Validated fields of a send request
struct CampaignRequest {
    list_name: String,
    subject: String,
    template_id: String,
    schedule_date: Option<String>,
}

impl CampaignRequest {
    fn parse(request: SendCampaignRequest) -> Result<Self, DispatchError> {
        fn required(value: Option<String>, field: &str, missing: &mut Vec<String>) -> String {
            match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(field.to_string());
                    String::new()
                }
            }
        }

        let mut missing = Vec::new();
        let list_name = required(request.list_name, "listName", &mut missing);
        let subject = required(request.subject, "subject", &mut missing);
        let template_id = required(request.template_id, "templateId", &mut missing);
        if !missing.is_empty() {
            return Err(DispatchError::MissingFields(missing));
        }

        let schedule_date = match request
            .schedule_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
        {
            Some(raw) => {
                let parsed = chrono::DateTime::parse_from_rfc3339(&raw)
                    .map_err(|_| DispatchError::InvalidScheduleDate(raw.clone()))?;
                Some(parsed.with_timezone(&chrono::Utc).to_rfc3339())
            }
            None => None,
        };

        Ok(Self {
            list_name,
            subject,
            template_id,
            schedule_date,
        })
    }
}

/// Sends one campaign to every contact of a list.
///
/// Delivery is sequential over a single transport session. A failed send is
/// recorded against its recipient and the loop moves on; only validation and
/// transport setup failures abort the run.
#[derive(Clone)]
pub struct CampaignDispatcher {
    contact_repo: Arc<dyn ContactRepository>,
    content_source: Arc<dyn CampaignContentSource>,
    transports: Arc<dyn MailTransportFactory>,
}

impl CampaignDispatcher {
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        content_source: Arc<dyn CampaignContentSource>,
        transports: Arc<dyn MailTransportFactory>,
    ) -> Self {
        Self {
            contact_repo,
            content_source,
            transports,
        }
    }

    pub async fn dispatch(
        &self,
        request: SendCampaignRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let mut tracker = PhaseTracker::new();
        tracker.advance(DispatchPhase::ValidatingInputs);

        let request = CampaignRequest::parse(request).map_err(|e| tracker.fail(e))?;

        let recipients = self
            .contact_repo
            .find_by_list(&request.list_name)
            .await
            .map_err(|e| tracker.fail(e.into()))?;
        if recipients.is_empty() {
            return Err(tracker.fail(DispatchError::EmptyList(request.list_name)));
        }

        let content = self
            .content_source
            .resolve(&request.template_id)
            .await
            .map_err(|e| tracker.fail(e.into()))?
            .ok_or_else(|| DispatchError::UnknownTemplate(request.template_id.clone()))
            .map_err(|e| tracker.fail(e))?;

        if let Some(scheduled_for) = request.schedule_date {
            tracing::info!(
                "Campaign for list '{}' scheduled for {} ({} recipients); not dispatched",
                request.list_name,
                scheduled_for,
                recipients.len()
            );
            tracker.advance(DispatchPhase::Completed);
            return Ok(DispatchOutcome::Scheduled {
                list_name: request.list_name,
                scheduled_for,
            });
        }

        tracker.advance(DispatchPhase::TransportVerification);
        let transport = self.transports.connect().map_err(|e| tracker.fail(e))?;
        transport
            .verify()
            .await
            .map_err(|e| tracker.fail(DispatchError::TransportUnavailable(e)))?;

        let total = recipients.len();
        let mut report = DispatchReport::default();
        for (index, contact) in recipients.iter().enumerate() {
            tracker.advance(DispatchPhase::Dispatching {
                index: index + 1,
                total,
            });

            let email = render_email(&request.subject, &content.html_body, contact);
            match transport.send(&email).await {
                Ok(()) => {
                    report.record_success();
                    metrics::counter!("campaign_emails_sent_total").increment(1);
                }
                Err(error) => {
                    tracing::warn!("Delivery to {} failed: {}", contact.email, error);
                    report.record_failure(&contact.email, error);
                    metrics::counter!("campaign_emails_failed_total").increment(1);
                }
            }
        }

        if let Err(e) = self.content_source.record_usage(&content).await {
            tracing::error!(
                "Failed to record usage for template {}: {}",
                content.template_id,
                e
            );
        }

        tracker.advance(DispatchPhase::Completed);
        metrics::counter!("campaign_dispatch_runs_total").increment(1);
        tracing::info!(
            "Campaign to list '{}' via {} finished: {} sent, {} failed",
            request.list_name,
            transport.transport_name(),
            report.sent,
            report.failed
        );

        Ok(DispatchOutcome::Completed {
            list_name: request.list_name,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainResult;
    use crate::infrastructure::providers::{BuiltinCatalog, MockMailTransport};
    use async_trait::async_trait;

    struct InMemoryContacts {
        contacts: Vec<Contact>,
    }

    impl InMemoryContacts {
        fn with(list: &str, people: &[(&str, &str, &str)]) -> Self {
            let contacts = people
                .iter()
                .map(|(name, email, company)| Contact {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    company: company.to_string(),
                    custom1: String::new(),
                    custom2: String::new(),
                    list_name: list.to_string(),
                    created_at: chrono::Utc::now().to_rfc3339(),
                })
                .collect();
            Self { contacts }
        }
    }

    #[async_trait]
    impl ContactRepository for InMemoryContacts {
        async fn insert_contacts(&self, contacts: &[Contact]) -> DomainResult<u64> {
            Ok(contacts.len() as u64)
        }

        async fn list_summaries(&self) -> DomainResult<Vec<ContactListSummary>> {
            Ok(vec![])
        }

        async fn find_by_list(&self, list_name: &str) -> DomainResult<Vec<Contact>> {
            Ok(self
                .contacts
                .iter()
                .filter(|c| c.list_name == list_name)
                .cloned()
                .collect())
        }

        async fn list_contacts(
            &self,
            _list_name: Option<&str>,
            _limit: i64,
            _offset: i64,
        ) -> DomainResult<Vec<Contact>> {
            Ok(self.contacts.clone())
        }

        async fn count_contacts(&self, _list_name: Option<&str>) -> DomainResult<i64> {
            Ok(self.contacts.len() as i64)
        }

        async fn delete_list(&self, _list_name: &str) -> DomainResult<u64> {
            Ok(0)
        }
    }

    fn dispatcher(contacts: InMemoryContacts, transport: &MockMailTransport) -> CampaignDispatcher {
        CampaignDispatcher::new(
            Arc::new(contacts),
            Arc::new(BuiltinCatalog::new()),
            Arc::new(transport.clone()),
        )
    }

    fn request(list: &str, template: &str) -> SendCampaignRequest {
        SendCampaignRequest {
            list_name: Some(list.into()),
            subject: Some("Hello {{name}}".into()),
            template_id: Some(template.into()),
            schedule_date: None,
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_recipient() {
        let transport = MockMailTransport::new().failing_for("bounce@example.com");
        let contacts = InMemoryContacts::with(
            "A",
            &[
                ("Ada", "ada@example.com", "Engines"),
                ("Bob", "bounce@example.com", "Acme"),
            ],
        );

        let outcome = dispatcher(contacts, &transport)
            .dispatch(request("A", "welcome"))
            .await
            .unwrap();

        let DispatchOutcome::Completed { report, list_name } = outcome else {
            panic!("expected completed dispatch");
        };
        assert_eq!(list_name, "A");
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failed_emails.len(), 1);
        assert_eq!(report.failed_emails[0].email, "bounce@example.com");
        assert!(report.failed_emails[0].error.contains("Mock delivery failure"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_sent_plus_failed_equals_recipient_count() {
        let people: Vec<(String, String)> = (0..7)
            .map(|i| (format!("P{i}"), format!("p{i}@example.com")))
            .collect();
        let refs: Vec<(&str, &str, &str)> = people
            .iter()
            .map(|(n, e)| (n.as_str(), e.as_str(), ""))
            .collect();
        let transport = MockMailTransport::new()
            .failing_for("p2@example.com")
            .failing_for("p5@example.com");

        let outcome = dispatcher(InMemoryContacts::with("big", &refs), &transport)
            .dispatch(request("big", "newsletter"))
            .await
            .unwrap();

        let DispatchOutcome::Completed { report, .. } = outcome else {
            panic!("expected completed dispatch");
        };
        assert_eq!(report.attempted(), 7);
        assert_eq!(report.failed, 2);
        assert_eq!(transport.send_attempts(), 7);
        assert_eq!(transport.connections(), 1);
    }

    #[tokio::test]
    async fn test_rendering_uses_fallbacks() {
        let transport = MockMailTransport::new();
        let contacts = InMemoryContacts::with("A", &[("", "anon@example.com", "")]);

        dispatcher(contacts, &transport)
            .dispatch(request("A", "welcome"))
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].subject, "Hello User");
        assert!(sent[0].html_body.contains("Welcome, User!"));
        assert!(sent[0].html_body.contains("Our Company"));
    }

    #[tokio::test]
    async fn test_empty_list_never_touches_transport() {
        let transport = MockMailTransport::new();
        let contacts = InMemoryContacts::with("A", &[("Ada", "ada@example.com", "")]);

        let err = dispatcher(contacts, &transport)
            .dispatch(request("missing", "welcome"))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::EmptyList(ref l) if l == "missing"));
        assert_eq!(transport.connections(), 0);
    }

    #[tokio::test]
    async fn test_unknown_template_is_rejected() {
        let transport = MockMailTransport::new();
        let contacts = InMemoryContacts::with("A", &[("Ada", "ada@example.com", "")]);

        let err = dispatcher(contacts, &transport)
            .dispatch(request("A", "nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::UnknownTemplate(ref t) if t == "nope"));
        assert_eq!(transport.connections(), 0);
    }

    #[tokio::test]
    async fn test_schedule_date_skips_sending() {
        let transport = MockMailTransport::new();
        let contacts = InMemoryContacts::with("A", &[("Ada", "ada@example.com", "")]);
        let mut req = request("A", "welcome");
        req.schedule_date = Some("2030-05-01T09:00:00+02:00".into());

        let outcome = dispatcher(contacts, &transport).dispatch(req).await.unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Scheduled {
                list_name: "A".into(),
                scheduled_for: "2030-05-01T07:00:00+00:00".into(),
            }
        );
        assert_eq!(transport.connections(), 0);
        assert_eq!(transport.send_attempts(), 0);
    }

    #[tokio::test]
    async fn test_invalid_schedule_date() {
        let transport = MockMailTransport::new();
        let contacts = InMemoryContacts::with("A", &[("Ada", "ada@example.com", "")]);
        let mut req = request("A", "welcome");
        req.schedule_date = Some("next tuesday".into());

        let err = dispatcher(contacts, &transport).dispatch(req).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidScheduleDate(_)));
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let transport = MockMailTransport::new();
        let err = dispatcher(InMemoryContacts::with("A", &[]), &transport)
            .dispatch(SendCampaignRequest {
                list_name: Some("  ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            DispatchError::MissingFields(fields) => {
                assert_eq!(fields, vec!["listName", "subject", "templateId"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verification_failure_aborts_before_sending() {
        let transport = MockMailTransport::new_unverifiable();
        let contacts = InMemoryContacts::with("A", &[("Ada", "ada@example.com", "")]);

        let err = dispatcher(contacts, &transport)
            .dispatch(request("A", "welcome"))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::TransportUnavailable(_)));
        assert_eq!(transport.connections(), 1);
        assert_eq!(transport.send_attempts(), 0);
    }
}

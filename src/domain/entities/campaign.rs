use serde::{Deserialize, Serialize};

/// Body of `POST /emails/send`. Fields are optional so that missing ones can
/// be reported together.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCampaignRequest {
    #[serde(default)]
    pub list_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub schedule_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedDelivery {
    pub email: String,
    pub error: String,
}

/// Per-run aggregate. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
    pub failed_emails: Vec<FailedDelivery>,
}

impl DispatchReport {
    pub fn record_success(&mut self) {
        self.sent += 1;
    }

    pub fn record_failure(&mut self, email: &str, error: String) {
        self.failed += 1;
        self.failed_emails.push(FailedDelivery {
            email: email.to_string(),
            error,
        });
    }

    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Completed {
        list_name: String,
        report: DispatchReport,
    },
    /// Acknowledged only; nothing is queued or persisted.
    Scheduled {
        list_name: String,
        scheduled_for: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSentResponse {
    pub message: String,
    pub sent: usize,
    pub failed: usize,
    pub failed_emails: Vec<FailedDelivery>,
    pub list_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignScheduledResponse {
    pub message: String,
    pub scheduled_for: String,
    pub list_name: String,
}

/// A fully rendered message for one recipient
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html_body: String,
}

/// Where the body of a campaign came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    Builtin,
    Stored,
}

/// Resolved body for a campaign, before per-recipient rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignContent {
    pub template_id: String,
    pub html_body: String,
    pub origin: ContentOrigin,
}

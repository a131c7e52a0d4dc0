use crate::domain::entities::CampaignContent;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Resolves a campaign's template identifier into a renderable body
#[async_trait]
pub trait CampaignContentSource: Send + Sync {
    async fn resolve(&self, template_id: &str) -> DomainResult<Option<CampaignContent>>;

    /// Called once after a dispatch run completes
    async fn record_usage(&self, _content: &CampaignContent) -> DomainResult<()> {
        Ok(())
    }
}

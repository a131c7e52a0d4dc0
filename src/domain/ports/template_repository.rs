use crate::domain::entities::Template;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    pub category: Option<String>,
    /// Case-insensitive substring match on the template name
    pub search: Option<String>,
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create_template(&self, template: &Template) -> DomainResult<()>;
    async fn get_template(&self, id: &str) -> DomainResult<Option<Template>>;
    async fn list_templates(
        &self,
        filter: &TemplateFilter,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Template>>;
    async fn count_templates(&self, filter: &TemplateFilter) -> DomainResult<i64>;
    /// Returns false when no template has this id
    async fn update_template(&self, template: &Template) -> DomainResult<bool>;
    /// Returns false when no template has this id
    async fn delete_template(&self, id: &str) -> DomainResult<bool>;
    async fn increment_usage(&self, id: &str) -> DomainResult<()>;
}

use crate::domain::entities::*;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::template_repository::{TemplateFilter, TemplateRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct TemplateService {
    template_repo: Arc<dyn TemplateRepository>,
}

impl TemplateService {
    pub fn new(template_repo: Arc<dyn TemplateRepository>) -> Self {
        Self { template_repo }
    }

    pub async fn create_template(&self, input: TemplateInput) -> DomainResult<Template> {
        let template = Template::new(input.validate()?);
        self.template_repo.create_template(&template).await?;

        tracing::info!(
            "Template created: {} ({} blocks)",
            template.id,
            template.blocks.len()
        );
        Ok(template)
    }

    pub async fn get_template(&self, id: &str) -> DomainResult<Template> {
        self.template_repo
            .get_template(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Template '{}' not found", id)))
    }

    pub async fn list_templates(&self, query: TemplateQuery) -> DomainResult<TemplateListResponse> {
        let page = PageRequest::new(query.page, query.limit);
        let filter = TemplateFilter {
            category: query.category.map(|c| c.trim().to_string()),
            search: query.search.map(|s| s.trim().to_string()),
        };

        let templates = self
            .template_repo
            .list_templates(&filter, page.limit, page.offset())
            .await?;
        let total = self.template_repo.count_templates(&filter).await?;

        Ok(TemplateListResponse {
            templates,
            pagination: Pagination::new(page, total),
        })
    }

    pub async fn update_template(&self, id: &str, input: TemplateInput) -> DomainResult<Template> {
        let draft = input.validate()?;
        let mut template = self.get_template(id).await?;
        template.apply(draft);

        if !self.template_repo.update_template(&template).await? {
            return Err(DomainError::NotFound(format!("Template '{}' not found", id)));
        }

        tracing::info!("Template updated: {}", template.id);
        Ok(template)
    }

    pub async fn delete_template(&self, id: &str) -> DomainResult<()> {
        if !self.template_repo.delete_template(id).await? {
            return Err(DomainError::NotFound(format!("Template '{}' not found", id)));
        }

        tracing::info!("Template deleted: {}", id);
        Ok(())
    }
}

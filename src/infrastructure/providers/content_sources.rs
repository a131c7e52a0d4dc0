use crate::domain::entities::{CampaignContent, ContentOrigin};
use crate::domain::errors::DomainResult;
use crate::domain::ports::content_source::CampaignContentSource;
use crate::domain::ports::template_repository::TemplateRepository;
use crate::domain::services::render_template_html;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

const WELCOME_HTML: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;">
<h1>Welcome, {{name}}!</h1>
<p>Thanks for joining the {{company}} community. We are glad to have you on board.</p>
<p>Best regards,<br>The Team</p>
</body>
</html>
"#;

const NEWSLETTER_HTML: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;">
<h1>This month at {{company}}</h1>
<p>Hi {{name}}, here is a roundup of what we have been working on.</p>
<p>See you next month!</p>
</body>
</html>
"#;

const PROMOTION_HTML: &str = r##"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;">
<h1>A special offer for {{name}}</h1>
<p>As a valued partner of {{company}}, you get early access to our latest deals.</p>
<p><a href="#" style="background:#2563eb;color:#fff;padding:10px 20px;text-decoration:none;">Claim offer</a></p>
</body>
</html>
"##;

const ANNOUNCEMENT_HTML: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family:Arial,sans-serif;">
<h1>Big news from {{company}}</h1>
<p>Hello {{name}}, we have something new to share with you.</p>
</body>
</html>
"#;

/// Fixed set of ready-made campaign bodies
pub struct BuiltinCatalog {
    entries: HashMap<&'static str, &'static str>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let entries = HashMap::from([
            ("welcome", WELCOME_HTML),
            ("newsletter", NEWSLETTER_HTML),
            ("promotion", PROMOTION_HTML),
            ("announcement", ANNOUNCEMENT_HTML),
        ]);
        Self { entries }
    }

    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CampaignContentSource for BuiltinCatalog {
    async fn resolve(&self, template_id: &str) -> DomainResult<Option<CampaignContent>> {
        Ok(self.entries.get(template_id).map(|html| CampaignContent {
            template_id: template_id.to_string(),
            html_body: (*html).to_string(),
            origin: ContentOrigin::Builtin,
        }))
    }
}

/// Campaign bodies rendered from templates in the store
pub struct StoredTemplateSource {
    templates: Arc<dyn TemplateRepository>,
}

impl StoredTemplateSource {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }
}

#[async_trait]
impl CampaignContentSource for StoredTemplateSource {
    async fn resolve(&self, template_id: &str) -> DomainResult<Option<CampaignContent>> {
        let template = self.templates.get_template(template_id).await?;
        Ok(template.map(|t| CampaignContent {
            template_id: t.id.clone(),
            html_body: render_template_html(&t),
            origin: ContentOrigin::Stored,
        }))
    }

    async fn record_usage(&self, content: &CampaignContent) -> DomainResult<()> {
        self.templates.increment_usage(&content.template_id).await
    }
}

/// Tries the built-in catalog first, then stored templates
pub struct LayeredContentSource {
    builtin: BuiltinCatalog,
    stored: StoredTemplateSource,
}

impl LayeredContentSource {
    pub fn new(builtin: BuiltinCatalog, stored: StoredTemplateSource) -> Self {
        Self { builtin, stored }
    }
}

#[async_trait]
impl CampaignContentSource for LayeredContentSource {
    async fn resolve(&self, template_id: &str) -> DomainResult<Option<CampaignContent>> {
        if let Some(content) = self.builtin.resolve(template_id).await? {
            return Ok(Some(content));
        }
        self.stored.resolve(template_id).await
    }

    async fn record_usage(&self, content: &CampaignContent) -> DomainResult<()> {
        match content.origin {
            ContentOrigin::Builtin => self.builtin.record_usage(content).await,
            ContentOrigin::Stored => self.stored.record_usage(content).await,
        }
    }
}

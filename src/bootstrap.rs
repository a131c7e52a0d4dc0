use crate::application::services::*;
use crate::config::{Config, MailTransportKind};
use crate::domain::ports::contact_repository::ContactRepository;
use crate::domain::ports::content_source::CampaignContentSource;
use crate::domain::ports::mail_transport::MailTransportFactory;
use crate::domain::ports::template_repository::TemplateRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::providers::{
    BuiltinCatalog, LayeredContentSource, MockMailTransport, SmtpTransportFactory,
    StoredTemplateSource,
};
use std::sync::Arc;

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let transports: Arc<dyn MailTransportFactory> = match config.mail_transport {
        MailTransportKind::Smtp => {
            let missing = config.smtp.missing();
            if !missing.is_empty() {
                tracing::warn!(
                    "SMTP is not fully configured (missing {}); campaign sends will fail",
                    missing.join(", ")
                );
            }
            Arc::new(SmtpTransportFactory::new(config.smtp.clone()))
        }
        MailTransportKind::Mock => {
            tracing::warn!("Using mock mail transport; no email will leave this process");
            Arc::new(MockMailTransport::new())
        }
    };

    build_app_state_with_transport(db, transports)
}

/// Wire services around an explicit transport factory
pub fn build_app_state_with_transport(
    db: Database,
    transports: Arc<dyn MailTransportFactory>,
) -> AppState {
    let contact_repo = Arc::new(db.clone()) as Arc<dyn ContactRepository>;
    let template_repo = Arc::new(db) as Arc<dyn TemplateRepository>;

    let contact_service = ContactService::new(contact_repo.clone());
    tracing::info!("Contact service initialized");

    let template_service = TemplateService::new(template_repo.clone());
    tracing::info!("Template service initialized");

    let catalog = BuiltinCatalog::new();
    tracing::info!("Built-in campaign templates: {}", catalog.ids().join(", "));
    let content_source = Arc::new(LayeredContentSource::new(
        catalog,
        StoredTemplateSource::new(template_repo),
    )) as Arc<dyn CampaignContentSource>;

    let campaign_dispatcher = CampaignDispatcher::new(contact_repo, content_source, transports);
    tracing::info!("Campaign dispatcher initialized");

    AppState {
        contact_service,
        template_service,
        campaign_dispatcher,
    }
}

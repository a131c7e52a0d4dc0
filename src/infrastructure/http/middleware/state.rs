use crate::application::services::{CampaignDispatcher, ContactService, TemplateService};

#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
    pub template_service: TemplateService,
    pub campaign_dispatcher: CampaignDispatcher,
}

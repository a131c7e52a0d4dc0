pub mod campaign_dispatcher;
pub mod contact_service;
pub mod template_service;

pub use campaign_dispatcher::{CampaignDispatcher, DispatchPhase};
pub use contact_service::ContactService;
pub use template_service::TemplateService;

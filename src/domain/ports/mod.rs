pub mod contact_repository;
pub mod content_source;
pub mod mail_transport;
pub mod template_repository;

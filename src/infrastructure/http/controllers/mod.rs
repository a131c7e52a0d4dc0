pub mod contacts;
pub mod emails;
pub mod templates;

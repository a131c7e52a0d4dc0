use crate::domain::entities::{Contact, ContactListSummary};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert all contacts atomically, returning how many were stored
    async fn insert_contacts(&self, contacts: &[Contact]) -> DomainResult<u64>;
    /// One entry per distinct list name, ordered by name
    async fn list_summaries(&self) -> DomainResult<Vec<ContactListSummary>>;
    /// Every contact carrying `list_name`, in import order
    async fn find_by_list(&self, list_name: &str) -> DomainResult<Vec<Contact>>;
    async fn list_contacts(
        &self,
        list_name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Contact>>;
    async fn count_contacts(&self, list_name: Option<&str>) -> DomainResult<i64>;
    async fn delete_list(&self, list_name: &str) -> DomainResult<u64>;
}

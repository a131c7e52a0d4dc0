use crate::domain::entities::*;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::contact_repository::ContactRepository;
use crate::shared::utils::email_validator::validate_and_normalize_email;
use std::sync::Arc;

#[derive(Clone)]
pub struct ContactService {
    contact_repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<dyn ContactRepository>) -> Self {
        Self { contact_repo }
    }

    /// Import a batch of contacts into one list.
    ///
    /// The whole batch is rejected if any row has an invalid email, so a
    /// partial import never happens.
    pub async fn save_contacts(
        &self,
        request: SaveContactsRequest,
    ) -> DomainResult<SaveContactsResponse> {
        let list_name = request
            .list_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DomainError::validation("listName is required"))?
            .to_string();

        if request.contacts.is_empty() {
            return Err(DomainError::validation(
                "contacts must contain at least one entry",
            ));
        }

        let mut contacts = Vec::with_capacity(request.contacts.len());
        let mut details = Vec::new();
        for (row, input) in request.contacts.into_iter().enumerate() {
            match validate_and_normalize_email(&input.email) {
                Ok(email) => contacts.push(Contact::new(input, email, &list_name)),
                Err(e) => details.push(format!("contacts[{}]: {}", row, detail_of(e))),
            }
        }

        if !details.is_empty() {
            return Err(DomainError::validation_with_details(
                format!("{} contact(s) have an invalid email", details.len()),
                details,
            ));
        }

        let count = self.contact_repo.insert_contacts(&contacts).await?;
        tracing::info!("Saved {} contacts to list '{}'", count, list_name);

        Ok(SaveContactsResponse {
            message: "Contacts saved successfully".to_string(),
            count,
            list_name,
        })
    }

    pub async fn list_summaries(&self) -> DomainResult<Vec<ContactListSummary>> {
        self.contact_repo.list_summaries().await
    }

    pub async fn list_contacts(&self, query: ContactQuery) -> DomainResult<ContactListResponse> {
        let page = PageRequest::new(query.page, query.limit);
        let list_name = query
            .list_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let contacts = self
            .contact_repo
            .list_contacts(list_name, page.limit, page.offset())
            .await?;
        let total = self.contact_repo.count_contacts(list_name).await?;

        Ok(ContactListResponse {
            contacts,
            pagination: Pagination::new(page, total),
        })
    }

    pub async fn delete_list(&self, list_name: &str) -> DomainResult<DeleteListResponse> {
        let deleted = self.contact_repo.delete_list(list_name).await?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!(
                "Contact list '{}' not found",
                list_name
            )));
        }

        tracing::info!("Deleted list '{}' ({} contacts)", list_name, deleted);
        Ok(DeleteListResponse {
            message: "Contact list deleted".to_string(),
            deleted,
            list_name: list_name.to_string(),
        })
    }
}

fn detail_of(err: DomainError) -> String {
    match err {
        DomainError::ValidationError { message, .. } => message,
        other => other.to_string(),
    }
}

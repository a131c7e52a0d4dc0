use super::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// A campaign recipient. Belongs to exactly one list, referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub custom1: String,
    pub custom2: String,
    pub list_name: String,
    pub created_at: String, // ISO 8601
}

impl Contact {
    pub fn new(input: ContactInput, email: String, list_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            email,
            company: input.company.trim().to_string(),
            custom1: input.custom1,
            custom2: input.custom2,
            list_name: list_name.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One imported row. Every field is optional on the wire so that a row
/// missing its email is reported as a validation detail, not a parse error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub custom1: String,
    #[serde(default)]
    pub custom2: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContactsRequest {
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
    #[serde(default)]
    pub list_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContactsResponse {
    pub message: String,
    pub count: u64,
    pub list_name: String,
}

/// Aggregated view of a list. `id` equals `name` since lists are labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactListSummary {
    pub id: String,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub list_name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListResponse {
    pub message: String,
    pub deleted: u64,
    pub list_name: String,
}

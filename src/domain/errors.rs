use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Vec<String>,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        DomainError::ValidationError {
            details: vec![message.clone()],
            message,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: Vec<String>) -> Self {
        DomainError::ValidationError {
            message: message.into(),
            details,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures that abort a campaign dispatch run before or during transport setup.
///
/// Per-recipient delivery failures are not errors at this level; they are
/// collected into the dispatch report instead.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid schedule date '{0}': expected an RFC 3339 timestamp")]
    InvalidScheduleDate(String),
    #[error("No contacts found in list '{0}'")]
    EmptyList(String),
    #[error("Template '{0}' not found")]
    UnknownTemplate(String),
    #[error("Email configuration missing: {0}")]
    Configuration(String),
    #[error("Email transport unavailable: {0}")]
    TransportUnavailable(String),
    #[error(transparent)]
    Repository(#[from] DomainError),
}

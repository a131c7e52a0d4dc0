use crate::domain::errors::{DomainError, DomainResult};

pub fn validate_and_normalize_email(email: &str) -> DomainResult<String> {
    let trimmed = email.trim();

    if !email_address::EmailAddress::is_valid(trimmed) {
        return Err(DomainError::validation(format!(
            "Invalid email '{}'. Must be in format user@domain.tld",
            trimmed
        )));
    }

    // Require a TLD (dot after @)
    if let Some(at_pos) = trimmed.find('@') {
        let domain_part = &trimmed[at_pos + 1..];
        if !domain_part.contains('.') {
            return Err(DomainError::validation(format!(
                "Invalid email '{}'. Domain must include a TLD (e.g., .com, .org)",
                trimmed
            )));
        }
    }

    // Normalize to lowercase for consistent storage
    Ok(trimmed.to_lowercase())
}

use crate::domain::entities::{Contact, OutgoingEmail};

pub const NAME_TOKEN: &str = "{{name}}";
pub const COMPANY_TOKEN: &str = "{{company}}";
pub const EMAIL_TOKEN: &str = "{{email}}";
pub const CUSTOM1_TOKEN: &str = "{{custom1}}";
pub const CUSTOM2_TOKEN: &str = "{{custom2}}";

pub const DEFAULT_NAME: &str = "User";
pub const DEFAULT_COMPANY: &str = "Our Company";

/// Substitute recipient placeholders in `template`.
///
/// Only the first occurrence of each token is replaced. Any repeat of the same
/// token is left verbatim in the output, so templates that need a value twice
/// must not rely on this renderer to fill both.
///
/// Substitution is chained: each token is searched in the output of the
/// previous step. A recipient value that itself contains a later token (a
/// name of `{{company}}`, say) is rewritten, and that token's single
/// replacement is spent on it instead of on the template.
pub fn render(template: &str, contact: &Contact) -> String {
    let substitutions = [
        (NAME_TOKEN, or_default(&contact.name, DEFAULT_NAME)),
        (COMPANY_TOKEN, or_default(&contact.company, DEFAULT_COMPANY)),
        (EMAIL_TOKEN, contact.email.as_str()),
        (CUSTOM1_TOKEN, contact.custom1.as_str()),
        (CUSTOM2_TOKEN, contact.custom2.as_str()),
    ];

    substitutions
        .iter()
        .fold(template.to_string(), |acc, (token, value)| {
            acc.replacen(token, value, 1)
        })
}

/// Render subject and body for one recipient
pub fn render_email(subject: &str, html_body: &str, contact: &Contact) -> OutgoingEmail {
    let to_name = Some(contact.name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    OutgoingEmail {
        to: contact.email.clone(),
        to_name,
        subject: render(subject, contact),
        html_body: render(html_body, contact),
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

//! Field validation for email records.
//!
//! Checks run before every write. Violations are reported in field
//! declaration order (`email`, then `name`), at most one per field.

use validator::ValidateEmail;

use crate::contract::model::{Email, Field, Reason, Violation};

/// Validate a candidate record.
pub fn validate(record: &Email) -> Result<(), Vec<Violation>> {
    let violations: Vec<Violation> = [check_email(&record.email), check_name(&record.name)]
        .into_iter()
        .flatten()
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_email(email: &str) -> Option<Violation> {
    if email.is_empty() {
        return Some(Violation::new(Field::Email, Reason::Empty));
    }
    if !is_well_formed(email) {
        return Some(Violation::new(Field::Email, Reason::Malformed));
    }
    None
}

fn check_name(name: &str) -> Option<Violation> {
    if name.is_empty() {
        return Some(Violation::new(Field::Name, Reason::Empty));
    }
    None
}

/// `local@domain` accepted by the `validator` crate, where the domain is a
/// host name (no IP literal) of at least two non-empty dot-separated labels
/// ending in a top-level domain.
pub fn is_well_formed(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if domain.starts_with('[') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels.last().is_some_and(|tld| is_tld(tld))
}

/// Two or more letters, or an IDNA `xn--` label.
fn is_tld(label: &str) -> bool {
    let lower = label.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("xn") {
        if rest.len() >= 2 && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return true;
        }
    }
    label.chars().count() >= 2 && label.chars().all(char::is_alphabetic)
}

use thiserror::Error;

use crate::contract::model::Violation;

/// Errors that are safe to expose outside the module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailsError {
    #[error("Email not found: {email}")]
    NotFound { email: String },

    #[error("Email '{email}' already exists")]
    Conflict { email: String },

    #[error("Validation failed: {}", join_violations(.violations))]
    Validation { violations: Vec<Violation> },

    #[error("Internal error")]
    Internal,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl EmailsError {
    pub fn not_found(email: impl Into<String>) -> Self {
        Self::NotFound {
            email: email.into(),
        }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::Validation { violations }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for EmailsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            NotFound { email } => Self::not_found(email),
            Conflict { email } => Self::conflict(email),
            Validation { violations } => Self::validation(violations),
            Store { message } => {
                // Keep store details out of the public error
                tracing::error!(error = %message, "Store error occurred");
                Self::internal()
            }
        }
    }
}

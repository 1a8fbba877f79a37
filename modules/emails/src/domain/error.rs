use thiserror::Error;

use crate::contract::model::Violation;
use crate::domain::repo::StoreError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email not found: {email}")]
    NotFound { email: String },

    #[error("Email '{email}' already exists")]
    Conflict { email: String },

    #[error("Validation failed with {} violation(s)", .violations.len())]
    Validation { violations: Vec<Violation> },

    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
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

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { key } => Self::conflict(key),
            StoreError::Backend(inner) => Self::store(format!("{inner:#}")),
        }
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::Email;

/// Failures reported by the storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a write because the key is already taken.
    #[error("duplicate key '{key}'")]
    Conflict { key: String },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn conflict(key: impl Into<String>) -> Self {
        Self::Conflict { key: key.into() }
    }
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait EmailsRepository: Send + Sync {
    /// Load every record in store order.
    async fn find_all(&self) -> Result<Vec<Email>, StoreError>;
    /// Load a record by its primary key.
    async fn find_by_email(&self, email: &str) -> Result<Option<Email>, StoreError>;
    /// Insert a fully-formed record.
    ///
    /// Service computes id/validation; repo persists. A duplicate key must be
    /// reported as [`StoreError::Conflict`].
    async fn insert(&self, e: Email) -> Result<Email, StoreError>;
    /// Overwrite an existing record (by primary key in `e.email`).
    async fn update(&self, e: Email) -> Result<Email, StoreError>;
    /// Delete by primary key. Returns true if a row was deleted.
    async fn delete_by_email(&self, email: &str) -> Result<bool, StoreError>;
}

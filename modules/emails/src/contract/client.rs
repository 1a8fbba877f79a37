use async_trait::async_trait;

use crate::contract::{
    error::EmailsError,
    model::{Email, EmailUpdate, NewEmail},
};

/// Public API trait for the emails module, consumed by the GraphQL resolver
#[async_trait]
pub trait EmailsApi: Send + Sync {
    /// List every stored record
    async fn list_emails(&self) -> Result<Vec<Email>, EmailsError>;

    /// Get a record by its email address; `None` when absent
    async fn get_email(&self, email: &str) -> Result<Option<Email>, EmailsError>;

    /// Create a new record
    async fn create_email(&self, new_email: NewEmail) -> Result<Email, EmailsError>;

    /// Rename an existing record
    async fn update_email(&self, update: EmailUpdate) -> Result<Email, EmailsError>;

    /// Delete a record, returning it as it was before deletion
    async fn remove_email(&self, email: &str) -> Result<Email, EmailsError>;
}

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Email, EmailUpdate, NewEmail};
use crate::domain::error::DomainError;
use crate::domain::repo::EmailsRepository;
use crate::domain::validation;

/// Domain service with the business rules for email records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn EmailsRepository>,
}

impl Service {
    /// Create a service over a storage collaborator.
    pub fn new(repo: Arc<dyn EmailsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "emails.service.find_all", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Email>, DomainError> {
        debug!("Listing emails");
        let emails = self.repo.find_all().await?;
        debug!("Successfully listed {} emails", emails.len());
        Ok(emails)
    }

    #[instrument(name = "emails.service.find_one", skip(self), fields(email = %email))]
    pub async fn find_one(&self, email: &str) -> Result<Option<Email>, DomainError> {
        debug!("Getting email by key");
        Ok(self.repo.find_by_email(email).await?)
    }

    /// Validate and insert. Uniqueness is left to the store: a duplicate key
    /// comes back as [`DomainError::Conflict`].
    #[instrument(
        name = "emails.service.create",
        skip(self),
        fields(email = %new_email.email)
    )]
    pub async fn create(&self, new_email: NewEmail) -> Result<Email, DomainError> {
        info!("Creating new email");

        let candidate = Email {
            id: Uuid::new_v4(),
            email: new_email.email,
            name: new_email.name,
        };
        validation::validate(&candidate).map_err(DomainError::validation)?;

        let created = self.repo.insert(candidate).await?;

        info!("Successfully created email with id={}", created.id);
        Ok(created)
    }

    #[instrument(
        name = "emails.service.update",
        skip(self),
        fields(email = %update.email)
    )]
    pub async fn update(&self, update: EmailUpdate) -> Result<Email, DomainError> {
        info!("Updating email");

        // Load current
        let mut current = self
            .repo
            .find_by_email(&update.email)
            .await?
            .ok_or_else(|| DomainError::not_found(&update.email))?;

        // Only the name is mutable; the merged record is re-validated in full
        current.name = update.name;
        validation::validate(&current).map_err(DomainError::validation)?;

        let updated = self.repo.update(current).await?;

        info!("Successfully updated email");
        Ok(updated)
    }

    #[instrument(name = "emails.service.remove", skip(self), fields(email = %email))]
    pub async fn remove(&self, email: &str) -> Result<Email, DomainError> {
        info!("Removing email");

        let existing = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(email))?;

        let deleted = self.repo.delete_by_email(email).await?;
        if !deleted {
            // Lost a race with a concurrent remove between lookup and delete
            debug!("Record vanished before delete");
        }

        info!("Successfully removed email");
        Ok(existing)
    }
}

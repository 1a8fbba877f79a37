//! GraphQL resolvers.
//!
//! Each field is a thin adapter: decode arguments, call [`EmailsApi`],
//! convert the result. Business rules live in the domain service.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Object, Result, Schema};
use tracing::{error, info};

use crate::api::graphql::dto::{CreateEmailInput, EmailDto, UpdateEmailInput};
use crate::api::graphql::error::map_emails_error;
use crate::contract::client::EmailsApi;

pub type EmailsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over a client implementation.
pub fn build_schema(api: Arc<dyn EmailsApi>) -> EmailsSchema {
    Schema::build(
        QueryRoot::new(api.clone()),
        MutationRoot::new(api),
        EmptySubscription,
    )
    .finish()
}

pub struct QueryRoot {
    api: Arc<dyn EmailsApi>,
}

impl QueryRoot {
    pub fn new(api: Arc<dyn EmailsApi>) -> Self {
        Self { api }
    }
}

#[Object]
impl QueryRoot {
    /// Every stored email.
    async fn emails(&self) -> Result<Vec<EmailDto>> {
        info!("Listing emails");
        match self.api.list_emails().await {
            Ok(emails) => Ok(emails.into_iter().map(EmailDto::from).collect()),
            Err(e) => {
                error!("Failed to list emails: {}", e);
                Err(map_emails_error(e))
            }
        }
    }

    /// A single email by address, or null.
    async fn email(&self, email: String) -> Result<Option<EmailDto>> {
        info!("Getting email: {}", email);
        match self.api.get_email(&email).await {
            Ok(found) => Ok(found.map(EmailDto::from)),
            Err(e) => {
                error!("Failed to get email {}: {}", email, e);
                Err(map_emails_error(e))
            }
        }
    }
}

pub struct MutationRoot {
    api: Arc<dyn EmailsApi>,
}

impl MutationRoot {
    pub fn new(api: Arc<dyn EmailsApi>) -> Self {
        Self { api }
    }
}

#[Object]
impl MutationRoot {
    async fn create_email(&self, create_email_input: CreateEmailInput) -> Result<EmailDto> {
        info!("Creating email: {:?}", create_email_input);
        match self.api.create_email(create_email_input.into()).await {
            Ok(created) => Ok(created.into()),
            Err(e) => {
                error!("Failed to create email: {}", e);
                Err(map_emails_error(e))
            }
        }
    }

    async fn update_email(&self, update_email_input: UpdateEmailInput) -> Result<EmailDto> {
        info!("Updating email: {:?}", update_email_input);
        match self.api.update_email(update_email_input.into()).await {
            Ok(updated) => Ok(updated.into()),
            Err(e) => {
                error!("Failed to update email: {}", e);
                Err(map_emails_error(e))
            }
        }
    }

    /// Delete an email and return it as it was before deletion.
    async fn remove_email(&self, email: String) -> Result<EmailDto> {
        info!("Removing email: {}", email);
        match self.api.remove_email(&email).await {
            Ok(removed) => Ok(removed.into()),
            Err(e) => {
                error!("Failed to remove email {}: {}", email, e);
                Err(map_emails_error(e))
            }
        }
    }
}

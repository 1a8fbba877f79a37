use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::EmailsApi,
    error::EmailsError,
    model::{Email, EmailUpdate, NewEmail},
};
use crate::domain::service::Service;

/// Local implementation of the EmailsApi trait that delegates to the domain service
pub struct EmailsLocalClient {
    service: Arc<Service>,
}

impl EmailsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmailsApi for EmailsLocalClient {
    async fn list_emails(&self) -> Result<Vec<Email>, EmailsError> {
        self.service.find_all().await.map_err(Into::into)
    }

    async fn get_email(&self, email: &str) -> Result<Option<Email>, EmailsError> {
        self.service.find_one(email).await.map_err(Into::into)
    }

    async fn create_email(&self, new_email: NewEmail) -> Result<Email, EmailsError> {
        self.service.create(new_email).await.map_err(Into::into)
    }

    async fn update_email(&self, update: EmailUpdate) -> Result<Email, EmailsError> {
        self.service.update(update).await.map_err(Into::into)
    }

    async fn remove_email(&self, email: &str) -> Result<Email, EmailsError> {
        self.service.remove(email).await.map_err(Into::into)
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use emails::{
    contract::client::EmailsApi,
    domain::service::Service,
    gateways::local::EmailsLocalClient,
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmEmailsRepository},
};

/// Create a fresh test database (in-memory SQLite) and run migrations.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Build the domain Service with a SeaORM-backed repository.
pub async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmEmailsRepository::new(db);
    Arc::new(Service::new(Arc::new(repo)))
}

/// Build a local in-process client on top of the Service.
pub async fn create_test_client() -> Arc<dyn EmailsApi> {
    let service = create_test_service().await;
    Arc::new(EmailsLocalClient::new(service))
}

//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.

use anyhow::Context;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set, SqlErr};

use crate::contract::model::Email;
use crate::domain::repo::{EmailsRepository, StoreError};
use crate::infra::storage::entity::{ActiveModel as EmailAM, Entity as EmailEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmEmailsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmEmailsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn to_active(e: Email) -> EmailAM {
    EmailAM {
        email: Set(e.email),
        id: Set(e.id),
        name: Set(e.name),
    }
}

/// True when the backend rejected a write on a unique or primary key.
///
/// SeaORM classifies the common driver codes; the message fallback covers
/// SQLite primary-key failures reported under the generic constraint code.
fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    let msg = err.to_string();
    msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key value")
}

#[async_trait::async_trait]
impl<C> EmailsRepository for SeaOrmEmailsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_all(&self) -> Result<Vec<Email>, StoreError> {
        let rows = EmailEntity::find()
            .all(&self.conn)
            .await
            .context("find_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Email>, StoreError> {
        let found = EmailEntity::find_by_id(email.to_owned())
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, e: Email) -> Result<Email, StoreError> {
        let key = e.email.clone();
        match to_active(e).insert(&self.conn).await {
            Ok(m) => Ok(m.into()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::conflict(key)),
            Err(err) => Err(anyhow::Error::new(err).context("insert failed").into()),
        }
    }

    async fn update(&self, e: Email) -> Result<Email, StoreError> {
        let m = to_active(e)
            .update(&self.conn)
            .await
            .context("update failed")?;
        Ok(m.into())
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let res = EmailEntity::delete_by_id(email.to_owned())
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

//! Audit log store.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query};

use crate::domain::StoreError;

use super::models::NewAuditEntry;

const RECORD_SQL: &str = include_str!("sql/record_entry.sql");

/// Append-only store of destructive-action records.
#[automock]
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: NewAuditEntry) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn record(&self, entry: NewAuditEntry) -> Result<(), StoreError> {
        query(RECORD_SQL)
            .bind(entry.action.as_str())
            .bind(entry.user_id.map(crate::UserId::into_i64))
            .bind(entry.comment_id)
            .bind(entry.details)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

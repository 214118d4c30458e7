//! Settings store.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use sqlx::{PgPool, query, query_scalar};

use crate::domain::StoreError;

use super::models::CleanupSettings;

const LOAD_SQL: &str = include_str!("sql/load_settings.sql");
const STORE_SQL: &str = include_str!("sql/store_settings.sql");

/// Single-document store for [`CleanupSettings`].
#[automock]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load stored settings, falling back to defaults when none were
    /// stored yet or the stored document no longer parses.
    async fn load(&self) -> Result<CleanupSettings, StoreError>;

    async fn store(&self, settings: CleanupSettings) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn load(&self) -> Result<CleanupSettings, StoreError> {
        let stored: Option<Value> = query_scalar(LOAD_SQL)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        let settings = stored
            .and_then(|value| match serde_json::from_value(value) {
                Ok(settings) => Some(settings),
                Err(error) => {
                    tracing::warn!("stored cleanup settings no longer parse, using defaults: {error}");

                    None
                }
            })
            .unwrap_or_default();

        Ok(settings)
    }

    async fn store(&self, settings: CleanupSettings) -> Result<(), StoreError> {
        let document = serde_json::to_value(&settings)?;

        query(STORE_SQL)
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{auth::models::{ApiTokenMetadata, NewApiToken}, domain::StoreError};

const FIND_TOKEN_BY_HASH_SQL: &str = include_str!("sql/find_token_by_hash.sql");
const INSERT_TOKEN_SQL: &str = include_str!("sql/insert_token.sql");
const LIST_TOKENS_SQL: &str = include_str!("sql/list_tokens.sql");
const REVOKE_TOKEN_SQL: &str = include_str!("sql/revoke_token.sql");
const TOUCH_LAST_USED_SQL: &str = include_str!("sql/touch_last_used.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up an unrevoked token by its stored hash.
    pub(crate) async fn find_token_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ApiTokenMetadata>, StoreError> {
        query_as::<Postgres, ApiTokenMetadata>(FIND_TOKEN_BY_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    pub(crate) async fn insert_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, StoreError> {
        query_as::<Postgres, ApiTokenMetadata>(INSERT_TOKEN_SQL)
            .bind(token.uuid)
            .bind(&token.name)
            .bind(&token.capabilities)
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    pub(crate) async fn list_tokens(&self) -> Result<Vec<ApiTokenMetadata>, StoreError> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    /// Revoke a token. Returns `true` when the token existed and was
    /// still active.
    pub(crate) async fn revoke_token(&self, uuid: Uuid) -> Result<bool, StoreError> {
        let result = query(REVOKE_TOKEN_SQL)
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn touch_last_used(&self, uuid: Uuid) -> Result<(), StoreError> {
        query(TOUCH_LAST_USED_SQL)
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            capabilities: row.try_get("capabilities")?,
            created_at: row
                .try_get::<jiff_sqlx::Timestamp, _>("created_at")?
                .to_jiff(),
            last_used_at: row
                .try_get::<Option<jiff_sqlx::Timestamp>, _>("last_used_at")?
                .map(jiff_sqlx::Timestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<jiff_sqlx::Timestamp>, _>("revoked_at")?
                .map(jiff_sqlx::Timestamp::to_jiff),
        })
    }
}

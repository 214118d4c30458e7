//! User store adapter over the platform user tables.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{UserId, domain::StoreError};

use super::models::UserRecord;

const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const COUNT_POSTS_SQL: &str = include_str!("sql/count_posts.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

/// Read access to user records plus the single destructive operation the
/// cleanup pipeline needs.
#[automock]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Enumerate users whose role set does not intersect `exclude_roles`.
    /// `limit` bounds the enumeration; `None` returns everything.
    async fn list_users(
        &self,
        exclude_roles: &[String],
        limit: Option<i64>,
    ) -> Result<Vec<UserRecord>, StoreError>;

    /// Number of published posts authored by the user.
    async fn count_posts(&self, user: UserId) -> Result<i64, StoreError>;

    /// Look up a single user by identifier.
    async fn find_user(&self, user: UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Delete a user. Returns `false` when the store refused the deletion
    /// (for example because the row vanished between lookup and delete).
    async fn delete_user(&self, user: UserId) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_users(
        &self,
        exclude_roles: &[String],
        limit: Option<i64>,
    ) -> Result<Vec<UserRecord>, StoreError> {
        query_as::<_, UserRecord>(LIST_USERS_SQL)
            .bind(exclude_roles)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn count_posts(&self, user: UserId) -> Result<i64, StoreError> {
        query_scalar::<_, i64>(COUNT_POSTS_SQL)
            .bind(user.into_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn find_user(&self, user: UserId) -> Result<Option<UserRecord>, StoreError> {
        query_as::<_, UserRecord>(FIND_USER_SQL)
            .bind(user.into_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn delete_user(&self, user: UserId) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_i64())
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::new(row.try_get("id")?),
            login: row.try_get("user_login")?,
            email: row.try_get("user_email")?,
            display_name: row.try_get("display_name")?,
            registered_at: row.try_get::<SqlxTimestamp, _>("registered_at")?.to_jiff(),
            roles: row.try_get("roles")?,
        })
    }
}

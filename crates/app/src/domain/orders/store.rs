//! Order store adapter over the commerce tables.
//!
//! Order identity is unreliable: a registered customer's orders may be
//! recorded only under a billing email (guest checkout), and migrated data
//! may carry the customer link only as raw order metadata. The adapter
//! therefore exposes three lookups of increasing desperation; the
//! classifier runs them in order and stops at the first hit.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query_scalar};

use crate::{UserId, domain::StoreError};

const HAS_ORDER_FOR_CUSTOMER_SQL: &str = include_str!("sql/has_order_for_customer.sql");
const HAS_ORDER_FOR_EMAIL_SQL: &str = include_str!("sql/has_order_for_email.sql");
const HAS_ORDER_META_SQL: &str = include_str!("sql/has_order_meta_for_customer.sql");

/// Every order status the last-resort metadata lookup considers.
pub const ORDER_STATUSES: [&str; 7] = [
    "pending",
    "processing",
    "on-hold",
    "completed",
    "cancelled",
    "refunded",
    "failed",
];

/// Order-existence lookups by customer identity.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Any order linked to the customer identifier, any status or type.
    async fn has_order_for_customer(&self, user: UserId) -> Result<bool, StoreError>;

    /// Any order whose billing email matches, covering guest checkouts
    /// that were never linked to the account.
    async fn has_order_for_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Last-resort lookup: join order rows to their metadata and match
    /// `_customer_user` against the identifier across all known statuses.
    /// Catches legacy and migrated orders with no indexed customer link.
    async fn has_order_meta_for_customer(&self, user: UserId) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn has_order_for_customer(&self, user: UserId) -> Result<bool, StoreError> {
        query_scalar::<_, bool>(HAS_ORDER_FOR_CUSTOMER_SQL)
            .bind(user.into_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn has_order_for_email(&self, email: &str) -> Result<bool, StoreError> {
        query_scalar::<_, bool>(HAS_ORDER_FOR_EMAIL_SQL)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn has_order_meta_for_customer(&self, user: UserId) -> Result<bool, StoreError> {
        query_scalar::<_, bool>(HAS_ORDER_META_SQL)
            .bind(user.into_i64().to_string())
            .bind(&ORDER_STATUSES[..])
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }
}

//! Store adapter errors.

use thiserror::Error;

/// Failure inside one of the backing stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("stored document error")]
    Json(#[from] serde_json::Error),
}

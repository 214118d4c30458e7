use thiserror::Error;

use crate::domain::StoreError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The presented token matched no active record.
    #[error("token not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for AuthServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Store(StoreError::from(error))
    }
}

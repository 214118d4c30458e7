//! Cleanup service errors.

use thiserror::Error;

use crate::domain::StoreError;

#[derive(Debug, Error)]
pub enum CleanupError {
    /// The principal lacks the capability the operation requires. Fatal to
    /// the whole request; no per-item work happens.
    #[error("permission denied")]
    PermissionDenied,

    /// A backing store failed during enumeration or classification. Fatal
    /// to a scan; no partial results are returned.
    #[error("store failure")]
    Store(#[from] StoreError),
}

//! Cleanup Errors

use salvo::http::StatusError;
use tracing::error;

use culler_app::domain::cleanup::CleanupError;

pub(crate) fn into_status_error(error: CleanupError) -> StatusError {
    match error {
        CleanupError::PermissionDenied => {
            StatusError::forbidden().brief("Insufficient capabilities")
        }
        CleanupError::Store(source) => {
            error!("cleanup operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

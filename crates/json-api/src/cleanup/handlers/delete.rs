//! Bulk-Delete Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use culler_app::domain::cleanup::DeletionOutcome;

use crate::{cleanup::errors::into_status_error, extensions::*, state::State};

/// Bulk-delete request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteRequest {
    /// IDs of the users to delete
    pub user_ids: Vec<i64>,
}

/// Bulk-delete response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteResponse {
    pub message: String,
    /// Number of users actually deleted
    pub deleted: u64,
    /// One entry per user that could not be deleted
    pub errors: Vec<String>,
}

impl From<DeletionOutcome> for DeleteResponse {
    fn from(outcome: DeletionOutcome) -> Self {
        let message = if outcome.errors.is_empty() {
            format!("{} users deleted successfully.", outcome.deleted)
        } else {
            "Some users could not be deleted.".to_string()
        };

        Self {
            message,
            deleted: outcome.deleted,
            errors: outcome.errors,
        }
    }
}

/// Bulk-Delete Handler
///
/// Deletes the given users, skipping administrators and recording an
/// audit entry per deletion. Failures are reported per user; the batch
/// always runs to the end.
#[endpoint(
    tags("cleanup"),
    summary = "Delete users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All users deleted"),
        (status_code = StatusCode::MULTI_STATUS, description = "Some users could not be deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty user ID list"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing capability"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<DeleteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DeleteResponse>, StatusError> {
    let request = json.into_inner();

    if request.user_ids.is_empty() {
        return Err(StatusError::bad_request().brief("No user IDs provided"));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let outcome = state
        .app
        .cleanup
        .delete_users(principal, &request.user_ids)
        .await
        .map_err(into_status_error)?;

    if !outcome.errors.is_empty() {
        res.status_code(StatusCode::MULTI_STATUS);
    }

    Ok(Json(DeleteResponse::from(outcome)))
}

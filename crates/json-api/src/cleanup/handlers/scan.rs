//! Inactive-User Scan Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use culler_app::domain::cleanup::{InactiveUser, InactivityQuery, SortDirection, SortField};

use crate::{cleanup::errors::into_status_error, extensions::*, state::State};

/// Scan request. Every field is optional; omitted fields fall back to
/// the stored cleanup settings.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ScanRequest {
    pub check_posts: Option<bool>,
    pub check_orders: Option<bool>,
    pub exclude_roles: Option<Vec<String>>,
    pub excluded_domains: Option<String>,
    /// Bound on the number of users scanned; zero or negative means
    /// unbounded
    pub limit: Option<i64>,
    /// Sort field (registered, login, email). Unrecognized values keep
    /// enumeration order.
    pub sort: Option<String>,
    /// Sort direction (ascending, descending)
    pub direction: Option<String>,
}

impl ScanRequest {
    fn apply_to(self, query: &mut InactivityQuery) {
        if let Some(check_posts) = self.check_posts {
            query.check_posts = check_posts;
        }

        if let Some(check_orders) = self.check_orders {
            query.check_orders = check_orders;
        }

        if let Some(exclude_roles) = self.exclude_roles {
            query.exclude_roles = exclude_roles;
        }

        if let Some(excluded_domains) = self.excluded_domains {
            query.excluded_domains = excluded_domains;
        }

        if let Some(limit) = self.limit {
            // Zero or negative means unbounded, so the stored bound is
            // cleared rather than handed to the database.
            query.limit = (limit > 0).then_some(limit);
        }

        if let Some(sort) = self.sort.as_deref() {
            query.sort = SortField::parse(sort);
        }

        if let Some(direction) = self.direction.as_deref() {
            query.direction = SortDirection::parse(direction);
        }
    }
}

/// One inactive user in a scan response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InactiveUserResponse {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub display_name: String,
    pub registered_at: String,
    pub roles: Vec<String>,
}

impl From<InactiveUser> for InactiveUserResponse {
    fn from(user: InactiveUser) -> Self {
        Self {
            id: user.id.into_i64(),
            login: user.login,
            email: user.email,
            display_name: user.display_name,
            registered_at: user.registered_at.to_string(),
            roles: user.roles,
        }
    }
}

/// Scan response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScanResponse {
    /// The inactive users found
    pub users: Vec<InactiveUserResponse>,
    /// Number of users found
    pub count: usize,
}

/// Inactive-User Scan Handler
///
/// Classifies users against the stored settings, with per-request
/// overrides, and returns the inactive ones. Read-only.
#[endpoint(
    tags("cleanup"),
    summary = "Scan for inactive users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Scan complete"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing capability"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ScanRequest>,
    depot: &mut Depot,
) -> Result<Json<ScanResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let settings = state
        .app
        .settings
        .load()
        .await
        .or_500("failed to load cleanup settings")?;

    let mut query = InactivityQuery::from_settings(&settings);

    json.into_inner().apply_to(&mut query);

    let users = state
        .app
        .cleanup
        .scan(principal, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ScanResponse {
        count: users.len(),
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use culler_app::{
        UserId,
        domain::{
            cleanup::{CleanupError, MockCleanupService},
            settings::CleanupSettings,
        },
        principal::Capability,
    };

    use crate::test_helpers::cleanup_service;

    use super::*;

    fn inactive(id: i64, login: &str) -> InactiveUser {
        InactiveUser {
            id: UserId::new(id),
            login: login.to_string(),
            email: format!("{login}@example.net"),
            display_name: login.to_string(),
            registered_at: Timestamp::UNIX_EPOCH,
            roles: vec!["subscriber".to_string()],
        }
    }

    fn make_service(cleanup: MockCleanupService) -> Service {
        cleanup_service(cleanup, Router::with_path("cleanup/scan").post(handler))
    }

    #[tokio::test]
    async fn test_scan_returns_users_and_count() -> TestResult {
        let mut cleanup = MockCleanupService::new();

        cleanup
            .expect_scan()
            .once()
            .withf(|principal, _| principal.can(Capability::ViewConfiguration))
            .return_once(|_, _| Ok(vec![inactive(1, "bob"), inactive(2, "amy")]));

        cleanup.expect_delete_users().never();

        let response: ScanResponse = TestClient::post("http://example.com/cleanup/scan")
            .json(&json!({}))
            .send(&make_service(cleanup))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 2);
        assert_eq!(response.users.len(), 2);
        assert_eq!(response.users[0].login, "bob");

        Ok(())
    }

    #[tokio::test]
    async fn test_scan_merges_overrides_onto_stored_settings() -> TestResult {
        let mut cleanup = MockCleanupService::new();

        // Stored settings have both checks off; the request flips the
        // post check on and caps the result set.
        cleanup
            .expect_scan()
            .once()
            .withf(|_, query| {
                query.check_posts
                    && !query.check_orders
                    && query.limit == Some(10)
                    && query.sort == Some(SortField::Login)
                    && query.direction == SortDirection::Descending
                    && query.exclude_roles == CleanupSettings::default().exclude_roles
            })
            .return_once(|_, _| Ok(vec![]));

        cleanup.expect_delete_users().never();

        let response: ScanResponse = TestClient::post("http://example.com/cleanup/scan")
            .json(&json!({
                "check_posts": true,
                "limit": 10,
                "sort": "login",
                "direction": "descending",
            }))
            .send(&make_service(cleanup))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_scan_permission_denied_returns_403() -> TestResult {
        let mut cleanup = MockCleanupService::new();

        cleanup
            .expect_scan()
            .once()
            .return_once(|_, _| Err(CleanupError::PermissionDenied));

        cleanup.expect_delete_users().never();

        let res = TestClient::post("http://example.com/cleanup/scan")
            .json(&json!({}))
            .send(&make_service(cleanup))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_limit_override_scans_unbounded() -> TestResult {
        let mut cleanup = MockCleanupService::new();

        cleanup
            .expect_scan()
            .once()
            .withf(|_, query| query.limit.is_none())
            .return_once(|_, _| Ok(vec![]));

        cleanup.expect_delete_users().never();

        let res = TestClient::post("http://example.com/cleanup/scan")
            .json(&json!({ "limit": -1 }))
            .send(&make_service(cleanup))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[test]
    fn non_positive_limit_overrides_clear_the_bound() {
        let settings = CleanupSettings::default();

        for limit in [0, -1, i64::MIN] {
            let mut query = InactivityQuery::from_settings(&settings);

            query.limit = Some(50);

            ScanRequest {
                limit: Some(limit),
                ..ScanRequest::default()
            }
            .apply_to(&mut query);

            assert_eq!(query.limit, None, "limit {limit} should mean unbounded");
        }

        let mut query = InactivityQuery::from_settings(&settings);

        ScanRequest {
            limit: Some(25),
            ..ScanRequest::default()
        }
        .apply_to(&mut query);

        assert_eq!(query.limit, Some(25));
    }

    #[test]
    fn unrecognized_sort_override_clears_the_sort() {
        let settings = CleanupSettings::default();
        let mut query = InactivityQuery::from_settings(&settings);

        query.sort = Some(SortField::Email);

        ScanRequest {
            sort: Some("no-such-field".to_string()),
            ..ScanRequest::default()
        }
        .apply_to(&mut query);

        assert_eq!(query.sort, None);
    }
}

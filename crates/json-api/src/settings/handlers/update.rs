//! Update Settings Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use culler_app::{domain::settings::CleanupSettings, principal::Capability};

use crate::{extensions::*, settings::handlers::SettingsResponse, state::State};

/// Update settings request. Omitted fields reset to their defaults.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateSettingsRequest {
    pub check_posts: bool,
    pub check_orders: bool,
    pub exclude_roles: Vec<String>,
    pub excluded_domains: String,
}

impl Default for UpdateSettingsRequest {
    fn default() -> Self {
        let defaults = CleanupSettings::default();

        Self {
            check_posts: defaults.check_posts,
            check_orders: defaults.check_orders,
            exclude_roles: defaults.exclude_roles,
            excluded_domains: defaults.excluded_domains,
        }
    }
}

impl From<UpdateSettingsRequest> for CleanupSettings {
    fn from(request: UpdateSettingsRequest) -> Self {
        Self {
            check_posts: request.check_posts,
            check_orders: request.check_orders,
            exclude_roles: request.exclude_roles,
            excluded_domains: request.excluded_domains,
        }
    }
}

/// Update Settings Handler
#[endpoint(
    tags("settings"),
    summary = "Update cleanup settings",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Settings stored"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing capability"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateSettingsRequest>,
    depot: &mut Depot,
) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    if !principal.can(Capability::ManageSettings) {
        return Err(StatusError::forbidden().brief("Insufficient capabilities"));
    }

    let settings = CleanupSettings::from(json.into_inner());

    state
        .app
        .settings
        .store(settings.clone())
        .await
        .or_500("failed to store cleanup settings")?;

    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use culler_app::domain::settings::MockSettingsStore;

    use crate::test_helpers::settings_service;

    use super::*;

    fn make_service(settings: MockSettingsStore) -> Service {
        settings_service(settings, Router::with_path("settings").put(handler))
    }

    #[tokio::test]
    async fn test_update_stores_and_echoes_the_settings() -> TestResult {
        let mut settings = MockSettingsStore::new();

        settings
            .expect_store()
            .once()
            .withf(|stored| {
                stored.check_orders
                    && stored.exclude_roles == ["administrator"]
                    && stored.excluded_domains == "gmail.com"
            })
            .return_once(|_| Ok(()));

        settings.expect_load().never();

        let response: SettingsResponse = TestClient::put("http://example.com/settings")
            .json(&json!({
                "check_posts": false,
                "check_orders": true,
                "exclude_roles": ["administrator"],
                "excluded_domains": "gmail.com",
            }))
            .send(&make_service(settings))
            .await
            .take_json()
            .await?;

        assert!(response.check_orders);
        assert_eq!(response.excluded_domains, "gmail.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_omitted_fields_fall_back_to_defaults() -> TestResult {
        let mut settings = MockSettingsStore::new();

        settings
            .expect_store()
            .once()
            .withf(|stored| {
                stored.check_posts && stored.exclude_roles == CleanupSettings::default().exclude_roles
            })
            .return_once(|_| Ok(()));

        settings.expect_load().never();

        let res = TestClient::put("http://example.com/settings")
            .json(&json!({ "check_posts": true }))
            .send(&make_service(settings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}

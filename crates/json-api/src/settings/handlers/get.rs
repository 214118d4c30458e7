//! Get Settings Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use culler_app::{domain::settings::CleanupSettings, principal::Capability};

use crate::{extensions::*, state::State};

/// Stored cleanup settings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsResponse {
    /// Treat users with published posts as active
    pub check_posts: bool,
    /// Treat users with orders as active
    pub check_orders: bool,
    /// Roles never considered for cleanup
    pub exclude_roles: Vec<String>,
    /// Comma-separated email domains never considered for cleanup
    pub excluded_domains: String,
}

impl From<CleanupSettings> for SettingsResponse {
    fn from(settings: CleanupSettings) -> Self {
        Self {
            check_posts: settings.check_posts,
            check_orders: settings.check_orders,
            exclude_roles: settings.exclude_roles,
            excluded_domains: settings.excluded_domains,
        }
    }
}

/// Get Settings Handler
#[endpoint(
    tags("settings"),
    summary = "Get cleanup settings",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    if !principal.can(Capability::ViewConfiguration) {
        return Err(StatusError::forbidden().brief("Insufficient capabilities"));
    }

    let settings = state
        .app
        .settings
        .load()
        .await
        .or_500("failed to load cleanup settings")?;

    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use culler_app::domain::settings::{CleanupSettings, MockSettingsStore};

    use crate::test_helpers::settings_service;

    use super::*;

    fn make_service(settings: MockSettingsStore) -> Service {
        settings_service(settings, Router::with_path("settings").get(handler))
    }

    #[tokio::test]
    async fn test_get_settings_returns_stored_document() -> TestResult {
        let mut settings = MockSettingsStore::new();

        settings.expect_load().once().return_once(|| {
            Ok(CleanupSettings {
                check_posts: true,
                ..CleanupSettings::default()
            })
        });

        settings.expect_store().never();

        let response: SettingsResponse = TestClient::get("http://example.com/settings")
            .send(&make_service(settings))
            .await
            .take_json()
            .await?;

        assert!(response.check_posts);
        assert!(response.exclude_roles.contains(&"administrator".to_string()));

        Ok(())
    }
}

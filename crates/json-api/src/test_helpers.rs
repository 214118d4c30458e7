//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use culler_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        cleanup::MockCleanupService,
        settings::{CleanupSettings, MockSettingsStore},
    },
    principal::{Capability, Principal},
};

use crate::{extensions::*, state::State};

/// Principal holding every capability; individual tests exercise the
/// missing-capability paths through the service mocks.
pub(crate) fn test_principal() -> Principal {
    Principal::new(Capability::ALL)
}

#[salvo::handler]
pub(crate) async fn inject_principal(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_cleanup_mock() -> MockCleanupService {
    let mut cleanup = MockCleanupService::new();

    cleanup.expect_scan().never();
    cleanup.expect_delete_users().never();

    cleanup
}

fn strict_settings_mock() -> MockSettingsStore {
    let mut settings = MockSettingsStore::new();

    settings.expect_load().never();
    settings.expect_store().never();

    settings
}

/// Settings store that answers every load with the defaults.
fn default_settings_mock() -> MockSettingsStore {
    let mut settings = MockSettingsStore::new();

    settings
        .expect_load()
        .returning(|| Ok(CleanupSettings::default()));
    settings.expect_store().never();

    settings
}

fn make_state(
    cleanup: MockCleanupService,
    settings: MockSettingsStore,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext::new(
        Arc::new(cleanup),
        Arc::new(settings),
        Arc::new(auth),
    )))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_cleanup_mock(), strict_settings_mock(), auth)
}

/// Service wrapping a route with state and an authenticated principal,
/// backed by the given cleanup mock and default stored settings.
pub(crate) fn cleanup_service(cleanup: MockCleanupService, route: Router) -> Service {
    let state = make_state(cleanup, default_settings_mock(), strict_auth_mock());

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_principal)
            .push(route),
    )
}

pub(crate) fn settings_service(settings: MockSettingsStore, route: Router) -> Service {
    let state = make_state(strict_cleanup_mock(), settings, strict_auth_mock());

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_principal)
            .push(route),
    )
}

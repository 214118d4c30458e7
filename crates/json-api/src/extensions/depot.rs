//! Depot helper extensions.

use std::any::Any;

use culler_app::principal::Principal;
use salvo::prelude::{Depot, StatusError};

const PRINCIPAL_KEY: &str = "culler.principal";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated principal for downstream handlers.
    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated principal, or 401 when the auth middleware
    /// never ran.
    fn principal_or_401(&self) -> Result<&Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.insert(PRINCIPAL_KEY, principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.get::<Principal>(PRINCIPAL_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authenticated"))
    }
}

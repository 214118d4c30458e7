//! Application context: the wired-up service graph.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database,
    domain::{
        audit::PgAuditLog,
        cleanup::{CleanupService, UserCleanupService},
        orders::{OrderStore, PgOrderStore},
        settings::{PgSettingsStore, SettingsStore},
        users::PgUserStore,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Everything a caller needs to serve requests. Handlers depend on the
/// trait objects here, never on the Postgres implementations directly.
#[derive(Clone)]
pub struct AppContext {
    pub cleanup: Arc<dyn CleanupService>,
    pub settings: Arc<dyn SettingsStore>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        cleanup: Arc<dyn CleanupService>,
        settings: Arc<dyn SettingsStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            cleanup,
            settings,
            auth,
        }
    }

    /// Connect, run schema setup, and wire the Postgres-backed services.
    ///
    /// `orders_enabled` controls whether the order lookups participate in
    /// inactivity classification; deployments without the commerce tables
    /// run with it off.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or schema setup
    /// fails.
    pub async fn from_database_url(
        database_url: &str,
        orders_enabled: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url).await?;

        database::ensure_schema(&pool).await?;

        let users = Arc::new(PgUserStore::new(pool.clone()));

        let orders = orders_enabled
            .then(|| Arc::new(PgOrderStore::new(pool.clone())) as Arc<dyn OrderStore>);

        let audit = Arc::new(PgAuditLog::new(pool.clone()));

        Ok(Self::new(
            Arc::new(UserCleanupService::new(users, orders, audit)),
            Arc::new(PgSettingsStore::new(pool.clone())),
            Arc::new(PgAuthService::new(pool)),
        ))
    }
}

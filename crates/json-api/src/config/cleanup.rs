//! Cleanup Config

use clap::Args;

/// Cleanup pipeline settings.
#[derive(Debug, Args)]
pub struct CleanupConfig {
    /// Consult the order tables during inactivity classification.
    /// Disable on deployments without the commerce subsystem.
    #[arg(long, env = "ORDERS_ENABLED", default_value_t = true)]
    pub orders_enabled: bool,
}

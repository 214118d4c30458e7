//! Stored cleanup configuration.

pub mod models;
pub mod store;

pub use models::CleanupSettings;
pub use store::*;

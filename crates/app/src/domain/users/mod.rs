//! User store adapter.

pub mod models;
pub mod store;

pub use models::UserRecord;
pub use store::*;

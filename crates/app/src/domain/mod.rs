//! Domain modules.

pub mod audit;
pub mod cleanup;
pub mod errors;
pub mod orders;
pub mod settings;
pub mod users;

pub use errors::StoreError;

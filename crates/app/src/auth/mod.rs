//! API token authentication.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::{ApiTokenMetadata, IssuedApiToken, NewApiToken};
pub use service::*;
pub use token::{generate_token, hash_token};

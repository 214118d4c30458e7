//! Inactive-user detection and deletion.

pub mod classifier;
pub mod errors;
pub mod models;
pub mod service;

pub use classifier::InactivityClassifier;
pub use errors::CleanupError;
pub use models::{DeletionOutcome, InactiveUser, InactivityQuery, SortDirection, SortField};
pub use service::*;

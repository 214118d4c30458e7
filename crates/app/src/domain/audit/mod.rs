//! Append-only audit log.

pub mod log;
pub mod models;

pub use log::*;
pub use models::{AuditAction, NewAuditEntry};

//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod principal;

mod ids;

pub use ids::UserId;

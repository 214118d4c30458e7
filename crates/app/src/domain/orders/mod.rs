//! Order store adapter.

pub mod store;

pub use store::*;

//! Cleanup Handlers

pub(crate) mod delete;
pub(crate) mod scan;

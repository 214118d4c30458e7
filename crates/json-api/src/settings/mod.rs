//! Cleanup settings endpoints

pub(crate) mod handlers;

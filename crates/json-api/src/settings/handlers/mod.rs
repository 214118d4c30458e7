//! Settings Handlers

pub(crate) mod get;
pub(crate) mod update;

pub(crate) use get::SettingsResponse;

//! Principals and capabilities.
//!
//! Every service call that can read or destroy user data takes an explicit
//! [`Principal`] carrying the capabilities granted to the caller's API token.
//! There is no ambient "current user" state.

use std::{collections::BTreeSet, str::FromStr};

use thiserror::Error;

/// A single permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Read stored cleanup configuration and run scans.
    ViewConfiguration,
    /// Delete user accounts.
    DeleteUsers,
    /// Update stored cleanup configuration.
    ManageSettings,
}

impl Capability {
    /// All known capabilities, in grant-string order.
    pub const ALL: [Self; 3] = [Self::ViewConfiguration, Self::DeleteUsers, Self::ManageSettings];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewConfiguration => "view_configuration",
            Self::DeleteUsers => "delete_users",
            Self::ManageSettings => "manage_settings",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_configuration" => Ok(Self::ViewConfiguration),
            "delete_users" => Ok(Self::DeleteUsers),
            "manage_settings" => Ok(Self::ManageSettings),
            other => Err(UnknownCapability(other.to_string())),
        }
    }
}

/// An authenticated caller and the capabilities it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    capabilities: BTreeSet<Capability>,
}

impl Principal {
    #[must_use]
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }
}

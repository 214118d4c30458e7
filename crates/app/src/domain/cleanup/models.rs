//! Cleanup models.

use jiff::Timestamp;

use crate::{UserId, domain::settings::CleanupSettings, domain::users::UserRecord};

/// Field an inactive-user scan sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Registered,
    Login,
    Email,
}

impl SortField {
    /// Parse a request-supplied sort field. Unrecognized names yield
    /// `None`, which leaves results in enumeration order.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registered" | "user_registered" | "registration" => Some(Self::Registered),
            "login" | "user_login" => Some(Self::Login),
            "email" | "user_email" => Some(Self::Email),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Ascending unless the value names the descending order.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "descending" | "desc" => Self::Descending,
            _ => Self::Ascending,
        }
    }
}

/// Per-invocation scan configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InactivityQuery {
    /// Users holding any of these roles are never scanned.
    pub exclude_roles: Vec<String>,

    /// Treat any authored post as activity.
    pub check_posts: bool,

    /// Treat any discoverable order as activity.
    pub check_orders: bool,

    /// Bound on the number of users enumerated; `None` scans everything.
    pub limit: Option<i64>,

    /// `None` preserves enumeration order.
    pub sort: Option<SortField>,

    pub direction: SortDirection,

    /// Raw comma-separated list of excluded email domains.
    pub excluded_domains: String,
}

impl InactivityQuery {
    /// Query backed entirely by stored settings, with no sorting and no
    /// enumeration bound.
    #[must_use]
    pub fn from_settings(settings: &CleanupSettings) -> Self {
        Self {
            exclude_roles: settings.exclude_roles.clone(),
            check_posts: settings.check_posts,
            check_orders: settings.check_orders,
            limit: None,
            sort: None,
            direction: SortDirection::Ascending,
            excluded_domains: settings.excluded_domains.clone(),
        }
    }

    /// Parsed exclusion domains: trimmed, lowercased, empties dropped.
    #[must_use]
    pub fn excluded_domain_list(&self) -> Vec<String> {
        self.excluded_domains
            .split(',')
            .map(|domain| domain.trim().to_ascii_lowercase())
            .filter(|domain| !domain.is_empty())
            .collect()
    }
}

impl Default for InactivityQuery {
    fn default() -> Self {
        Self {
            exclude_roles: vec![
                "administrator".to_string(),
                "editor".to_string(),
                "author".to_string(),
            ],
            check_posts: true,
            check_orders: true,
            limit: None,
            sort: None,
            direction: SortDirection::Ascending,
            excluded_domains: String::new(),
        }
    }
}

/// Projection of a user classified as inactive. Recomputed on every scan.
#[derive(Debug, Clone, PartialEq)]
pub struct InactiveUser {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub display_name: String,
    pub registered_at: Timestamp,
    pub roles: Vec<String>,
}

impl From<UserRecord> for InactiveUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            login: user.login,
            email: user.email,
            display_name: user.display_name,
            registered_at: user.registered_at,
            roles: user.roles,
        }
    }
}

/// Aggregate result of one bulk-deletion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub deleted: u64,
    pub errors: Vec<String>,
}

/// Domain portion of a syntactically valid email address: exactly one
/// `@`, non-empty on both sides, no whitespace in the domain.
#[must_use]
pub fn email_domain(email: &str) -> Option<&str> {
    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }

    if domain.contains(char::is_whitespace) {
        return None;
    }

    Some(domain)
}

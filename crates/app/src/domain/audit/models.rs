//! Audit models.

use serde_json::Value;

use crate::UserId;

/// Action tag recorded with each audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    UserDeleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserDeleted => "user_deleted",
        }
    }
}

/// A new audit entry. Entries are append-only; the service never updates
/// or deletes them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub action: AuditAction,
    pub user_id: Option<UserId>,
    pub comment_id: Option<i64>,
    pub details: Value,
}

impl NewAuditEntry {
    /// Entry capturing a user's identity before deletion.
    #[must_use]
    pub fn user_deleted(user_id: UserId, login: &str, email: &str) -> Self {
        Self {
            action: AuditAction::UserDeleted,
            user_id: Some(user_id),
            comment_id: None,
            details: serde_json::json!({
                "user_login": login,
                "user_email": email,
            }),
        }
    }
}

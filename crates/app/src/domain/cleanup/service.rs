//! Cleanup service: candidate scanning and guarded bulk deletion.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info};

use crate::{
    UserId,
    domain::{
        audit::{AuditLog, NewAuditEntry},
        orders::OrderStore,
        users::UserStore,
    },
    principal::{Capability, Principal},
};

use super::{
    classifier::InactivityClassifier,
    errors::CleanupError,
    models::{
        DeletionOutcome, InactiveUser, InactivityQuery, SortDirection, SortField, email_domain,
    },
};

/// Role that can never be deleted through the cleanup path, regardless of
/// the caller's capabilities.
pub const PROTECTED_ROLE: &str = "administrator";

#[automock]
#[async_trait]
pub trait CleanupService: Send + Sync {
    /// Enumerate, classify, filter, and sort inactive users.
    async fn scan(
        &self,
        principal: &Principal,
        query: InactivityQuery,
    ) -> Result<Vec<InactiveUser>, CleanupError>;

    /// Delete the given users, continuing past per-item failures.
    async fn delete_users(
        &self,
        principal: &Principal,
        user_ids: &[i64],
    ) -> Result<DeletionOutcome, CleanupError>;
}

pub struct UserCleanupService {
    users: Arc<dyn UserStore>,
    audit: Arc<dyn AuditLog>,
    classifier: InactivityClassifier,
}

impl UserCleanupService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        orders: Option<Arc<dyn OrderStore>>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            classifier: InactivityClassifier::new(users.clone(), orders),
            users,
            audit,
        }
    }
}

#[async_trait]
impl CleanupService for UserCleanupService {
    async fn scan(
        &self,
        principal: &Principal,
        query: InactivityQuery,
    ) -> Result<Vec<InactiveUser>, CleanupError> {
        if !principal.can(Capability::ViewConfiguration) {
            return Err(CleanupError::PermissionDenied);
        }

        let candidates = self
            .users
            .list_users(&query.exclude_roles, query.limit)
            .await?;

        let excluded_domains = query.excluded_domain_list();
        let mut inactive = Vec::new();

        for user in candidates {
            if !self.classifier.is_inactive(&user, &query).await? {
                continue;
            }

            if is_domain_excluded(&user.email, &excluded_domains) {
                continue;
            }

            inactive.push(InactiveUser::from(user));
        }

        sort_inactive_users(&mut inactive, query.sort, query.direction);

        info!(count = inactive.len(), "inactive-user scan complete");

        Ok(inactive)
    }

    async fn delete_users(
        &self,
        principal: &Principal,
        user_ids: &[i64],
    ) -> Result<DeletionOutcome, CleanupError> {
        if !principal.can(Capability::DeleteUsers) {
            return Err(CleanupError::PermissionDenied);
        }

        let mut outcome = DeletionOutcome::default();

        for &raw_id in user_ids {
            let id = UserId::new(raw_id);

            let user = match self.users.find_user(id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    outcome.errors.push(format!("User ID {id} not found"));

                    continue;
                }
                Err(source) => {
                    // A failed lookup says nothing about whether the user
                    // exists; report the failure, not absence.
                    error!("lookup failed for user {id}: {source}");
                    outcome.errors.push(format!("Failed to delete user: {id}"));

                    continue;
                }
            };

            if user.roles.iter().any(|role| role == PROTECTED_ROLE) {
                outcome
                    .errors
                    .push(format!("Cannot delete administrator user: {}", user.login));

                continue;
            }

            // The audit entry goes in first so the trail holds the user's
            // identity even when the deletion itself fails.
            let entry = NewAuditEntry::user_deleted(id, &user.login, &user.email);

            if let Err(source) = self.audit.record(entry).await {
                error!("audit write failed for user {id}: {source}");
                outcome
                    .errors
                    .push(format!("Failed to delete user: {}", user.login));

                // Never delete without a trail.
                continue;
            }

            match self.users.delete_user(id).await {
                Ok(true) => outcome.deleted += 1,
                Ok(false) => {
                    outcome
                        .errors
                        .push(format!("Failed to delete user: {}", user.login));
                }
                Err(source) => {
                    error!("delete failed for user {id}: {source}");
                    outcome
                        .errors
                        .push(format!("Failed to delete user: {}", user.login));
                }
            }
        }

        info!(
            deleted = outcome.deleted,
            failed = outcome.errors.len(),
            "bulk deletion complete"
        );

        Ok(outcome)
    }
}

fn is_domain_excluded(email: &str, excluded_domains: &[String]) -> bool {
    let Some(domain) = email_domain(email) else {
        // Unparseable emails are never excluded by the domain rule.
        return false;
    };

    excluded_domains
        .iter()
        .any(|excluded| domain.eq_ignore_ascii_case(excluded))
}

fn sort_inactive_users(
    users: &mut [InactiveUser],
    sort: Option<SortField>,
    direction: SortDirection,
) {
    let Some(field) = sort else {
        // No recognized sort field: keep enumeration order.
        return;
    };

    users.sort_by(|a, b| {
        let ordering = match field {
            SortField::Registered => a.registered_at.cmp(&b.registered_at),
            SortField::Login => a.login.cmp(&b.login),
            SortField::Email => a.email.cmp(&b.email),
        };

        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

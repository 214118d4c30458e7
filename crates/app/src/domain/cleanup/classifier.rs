//! Inactivity classifier.

use std::sync::Arc;

use crate::domain::{orders::OrderStore, users::{UserRecord, UserStore}};

use super::{errors::CleanupError, models::InactivityQuery};

/// Decides whether a single user counts as inactive.
///
/// The order store is optional: when the commerce subsystem is not
/// deployed the order check is skipped silently rather than treated as an
/// error, so a false "has orders" can never keep a user alive but a
/// missing subsystem never blocks cleanup either.
#[derive(Clone)]
pub struct InactivityClassifier {
    users: Arc<dyn UserStore>,
    orders: Option<Arc<dyn OrderStore>>,
}

impl InactivityClassifier {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, orders: Option<Arc<dyn OrderStore>>) -> Self {
        Self { users, orders }
    }

    /// Classify one user under the given query. No side effects.
    ///
    /// A user is inactive when they have zero authored posts (if the post
    /// check is enabled) and none of the three order lookups finds an
    /// order (if the order check is enabled and the subsystem exists).
    /// The lookups run strictly in order (customer id, billing email,
    /// then the last-resort metadata join) and stop at the first hit.
    ///
    /// # Errors
    ///
    /// Propagates store failures; a scan must not silently misclassify a
    /// user because a lookup failed.
    pub async fn is_inactive(
        &self,
        user: &UserRecord,
        query: &InactivityQuery,
    ) -> Result<bool, CleanupError> {
        if query.check_posts && self.users.count_posts(user.id).await? > 0 {
            return Ok(false);
        }

        if query.check_orders {
            if let Some(orders) = &self.orders {
                if orders.has_order_for_customer(user.id).await? {
                    return Ok(false);
                }

                if orders.has_order_for_email(&user.email).await? {
                    return Ok(false);
                }

                if orders.has_order_meta_for_customer(user.id).await? {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }
}

//! User models.

use jiff::Timestamp;

use crate::UserId;

/// A user account as stored by the platform. Read-only to this service
/// except for [`store::UserStore::delete_user`](super::store::UserStore).
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub display_name: String,
    pub registered_at: Timestamp,
    pub roles: Vec<String>,
}

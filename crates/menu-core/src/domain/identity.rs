//! Verified requester identity

use uuid::Uuid;

/// Identity resolved for the current request by the authentication layer.
///
/// Passed explicitly into every service call; absence (`Option::None` at the
/// call site) means the requester is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self { user_id, username }
    }
}

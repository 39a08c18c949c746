//! Session payload for authenticated staff.
//!
//! The browser holds only a random server-issued session id; this payload is
//! what the server-side session store keeps under [`SESSION_STAFF_KEY`].
//! Every authenticated route resolves the caller's identity from here, never
//! from client-supplied cookie values.

use crate::staff::StaffUser;
use serde::{Deserialize, Serialize};

/// Key under which the staff identity is stored in the session.
pub const SESSION_STAFF_KEY: &str = "staff";

/// Identity of a logged-in staff member, tracked server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSession {
    pub user_id: String,
    pub display_name: String,
    pub role: String,
}

impl From<&StaffUser> for StaffSession {
    fn from(user: &StaffUser) -> Self {
        Self {
            user_id: user.id.clone(),
            display_name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category. `name` is unique, enforced by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Role string granting access to the back-office.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated back-office user as returned by the remote auth call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

impl AdminUser {
    /// Only `role == "admin"` is granted access to the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

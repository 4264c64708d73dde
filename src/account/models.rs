//! Account data models.

use serde::{Deserialize, Serialize};

/// A stored account row, including the password hash.
///
/// This type never crosses the service boundary; every outward-facing
/// representation is an [`AccountProfile`], which structurally omits the
/// hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub user_name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Public representation of an account.
///
/// There is no `password_hash` field here, so leaking it through a response
/// body is a compile error rather than a call-site discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            user_name: account.user_name,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub user_name: String,
}

/// Partial update payload. Absent fields are left untouched.
///
/// A supplied password is the raw password; the service re-hashes it before
/// anything is persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_name: Option<String>,
}

impl AccountChanges {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.user_name.is_none()
    }
}

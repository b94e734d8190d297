//! Account domain model.
//!
//! Accounts exist to scope entry storage per user; credential handling lives
//! in the account service and repository. No session or token state is kept.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = Uuid;

/// Public account projection, safe to hand to UI layers.
///
/// The stored password hash never leaves the repository/service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable global ID used to scope all entry storage.
    pub uuid: AccountId,
    /// Unique login name, trimmed, case-sensitive.
    pub username: String,
}

impl Account {
    /// Creates an account projection with a generated stable ID.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            username: username.into(),
        }
    }
}

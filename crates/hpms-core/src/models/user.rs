//! User model.

use serde::{Deserialize, Serialize};

/// An authentication record.
///
/// Only the bootstrap admin exists for now; the password is stored as a
/// one-way hash and no login flow checks it yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

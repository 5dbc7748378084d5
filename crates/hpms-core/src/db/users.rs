//! User table operations and admin bootstrap.

use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

use super::{Database, DbResult};
use crate::models::User;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_ROLE: &str = "admin";

/// One-way hash for stored credentials (hex-encoded SHA-256).
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

impl Database {
    /// Insert the default administrative user on first run.
    ///
    /// No login flow is enforced against this record yet; the row exists so
    /// a future authentication layer has something to check against.
    pub(crate) fn ensure_default_admin(&self) -> DbResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO users (username, password, role) VALUES (?1, ?2, ?3)",
            params![
                DEFAULT_ADMIN_USERNAME,
                hash_password(DEFAULT_ADMIN_PASSWORD),
                DEFAULT_ADMIN_ROLE,
            ],
        )?;
        Ok(())
    }

    /// Get a user by username.
    pub fn get_user(&self, username: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                "SELECT username, password, role FROM users WHERE username = ?",
                [username],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                        role: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }
}

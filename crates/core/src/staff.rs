//! Staff accounts and credential checks.
//!
//! Staff rows are seeded once through the CLI and are never created, updated
//! or deleted by any exposed operation. Login hashes the submitted password
//! with the same one-way function used at seed time and looks up a row
//! matching both the user id and the hash in one bound-parameter statement.

use crate::error::{FrontDeskError, FrontDeskResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::{FromRow, SqlitePool};

/// One row of the `users` table.
///
/// `role` is free text; Registration, Pharmacist and Diagnostics are the
/// roles seeded in practice but the store does not enforce the set.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: String,
    pub name: String,
    #[serde(skip)] // never serialize the password hash
    pub password_hash: String,
    pub role: String,
}

/// Hex-encoded SHA-256 of `password`.
///
/// Unsalted, matching the hashes the seed routine writes. `authenticate`
/// compares against stored values produced by this same function.
pub fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Look up the staff account matching both `user_id` and `password`.
///
/// Returns `Ok(None)` when no row matches; the web layer renders that as the
/// plain "No such user exists" page rather than an error.
pub async fn authenticate(
    pool: &SqlitePool,
    user_id: &str,
    password: &str,
) -> FrontDeskResult<Option<StaffUser>> {
    sqlx::query_as::<_, StaffUser>(
        "SELECT id, name, password_hash, role FROM users WHERE id = ? AND password_hash = ?",
    )
    .bind(user_id)
    .bind(sha256_hex(password))
    .fetch_optional(pool)
    .await
    .map_err(FrontDeskError::StoreQuery)
}

//! Store access layer.
//!
//! Durable storage for the front desk lives in a local SQLite database with
//! two tables, `patients` and `users`. This module owns the connection pool,
//! the idempotent schema, and the fixed-row seed routines.
//!
//! Schema application is safe to run on every start (`CREATE TABLE IF NOT
//! EXISTS`). Seeding is **not** run automatically: it is invoked explicitly
//! through the `frontdesk` CLI and is idempotent (`INSERT OR IGNORE`), so a
//! repeated `seed` command inserts nothing and reports zero rows.
//!
//! Every read and write checks a connection out of the pool for the duration
//! of one statement and returns it on every exit path. There is no shared
//! connection handle and no transaction spanning multiple logical operations.

use crate::error::{FrontDeskError, FrontDeskResult};
use crate::patient::joining_date_today;
use crate::staff::sha256_hex;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a pool against `database_url`, creating the database file if absent.
pub async fn connect(database_url: &str) -> FrontDeskResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(FrontDeskError::StoreConnect)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(FrontDeskError::StoreConnect)
}

/// Apply the store schema. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> FrontDeskResult<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS patients (
            ssn INTEGER NOT NULL UNIQUE,
            patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            age INTEGER NOT NULL,
            date_of_joining TEXT NOT NULL,
            registration_type TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1
        )"#,
    )
    .execute(pool)
    .await
    .map_err(FrontDeskError::Migration)?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await
    .map_err(FrontDeskError::Migration)?;

    Ok(())
}

/// Seed the four fixed staff accounts. Returns the number of rows inserted.
///
/// Two Registration clerks, one Pharmacist, one Diagnostics account. The
/// passwords are hashed here with the same function `authenticate` applies
/// at login time.
pub async fn seed_users(pool: &SqlitePool) -> FrontDeskResult<u64> {
    let accounts = [
        ("RE0001", "reuser1", "tcs_user1", "Registration"),
        ("RE0002", "reuser2", "tcs_user2", "Registration"),
        ("PH0001", "phuser1", "tcs_phuser1", "Pharmacist"),
        ("DE0001", "deuser1", "tcs_deuser1", "Diagnostics"),
    ];

    let mut inserted = 0;
    for (id, name, password, role) in accounts {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (id, name, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(sha256_hex(password))
        .bind(role)
        .execute(pool)
        .await
        .map_err(FrontDeskError::Seed)?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// Seed the two sample patient rows. Returns the number of rows inserted.
///
/// The sample records carry fixed patient ids so that re-seeding is a no-op
/// rather than a duplicate insert. Their joining date is the day the seed
/// command ran.
pub async fn seed_sample_patients(pool: &SqlitePool) -> FrontDeskResult<u64> {
    let date_today = joining_date_today();
    let records = [
        (987_412_365_i64, 100_000_000_i64, "natsu", "f-street-01, fiore", 19_i64),
        (987_412_354_i64, 100_000_001_i64, "gray", "f-street-16, fiore", 19_i64),
    ];

    let mut inserted = 0;
    for (ssn, patient_id, name, address, age) in records {
        let result = sqlx::query(
            r#"INSERT OR IGNORE INTO patients
                (ssn, patient_id, name, address, age, date_of_joining, registration_type, status)
                VALUES (?, ?, ?, ?, ?, ?, 'General', 1)"#,
        )
        .bind(ssn)
        .bind(patient_id)
        .bind(name)
        .bind(address)
        .bind(age)
        .bind(&date_today)
        .execute(pool)
        .await
        .map_err(FrontDeskError::Seed)?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

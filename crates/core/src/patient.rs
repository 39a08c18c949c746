//! Patient registry.
//!
//! Create, read and update operations over the `patients` table. Records are
//! created active (`status = 1`) with a joining date stamped server-side, and
//! the exposed operations can never change `patient_id`, `date_of_joining`
//! or `status` afterwards. Nothing deletes a patient.
//!
//! All statements use bound parameters; field values never reach the SQL
//! text itself.

use crate::error::{FrontDeskError, FrontDeskResult};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

/// One row of the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub ssn: i64,
    pub patient_id: i64,
    pub name: String,
    pub address: String,
    pub age: i64,
    pub date_of_joining: String,
    pub registration_type: String,
    pub status: i64,
}

/// Input for creating a patient. The joining date and status are not caller
/// supplied: creation stamps today's date and fixes status to active.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub ssn: i64,
    pub name: String,
    pub address: String,
    pub age: i64,
    pub registration_type: String,
}

/// Input for updating a patient. `patient_id` addresses the row; every other
/// field overwrites the stored value unconditionally.
#[derive(Debug, Clone)]
pub struct PatientUpdate {
    pub patient_id: i64,
    pub ssn: i64,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub registration_type: String,
}

/// Today's date in the `YYYY-MM-DD` format the roster stores and renders.
pub(crate) fn joining_date_today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Patient data operations over the store. No HTTP concerns.
#[derive(Clone)]
pub struct PatientRegistry {
    pool: SqlitePool,
}

impl PatientRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every patient in natural store order.
    pub async fn list(&self) -> FrontDeskResult<Vec<Patient>> {
        sqlx::query_as::<_, Patient>(
            r#"SELECT ssn, patient_id, name, address, age,
                      date_of_joining, registration_type, status
               FROM patients"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(FrontDeskError::StoreQuery)
    }

    /// Fetch one patient by primary key.
    pub async fn get(&self, patient_id: i64) -> FrontDeskResult<Option<Patient>> {
        sqlx::query_as::<_, Patient>(
            r#"SELECT ssn, patient_id, name, address, age,
                      date_of_joining, registration_type, status
               FROM patients WHERE patient_id = ?"#,
        )
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(FrontDeskError::StoreQuery)
    }

    /// Create a patient and return the assigned `patient_id`.
    ///
    /// `date_of_joining` is stamped as today's date and `status` is fixed to
    /// active. An `ssn` collision surfaces as a store error; the caller is
    /// expected to render it as a generic failure.
    pub async fn create(&self, new: NewPatient) -> FrontDeskResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO patients
                (ssn, name, address, age, date_of_joining, registration_type, status)
               VALUES (?, ?, ?, ?, ?, ?, 1)
               RETURNING patient_id"#,
        )
        .bind(new.ssn)
        .bind(&new.name)
        .bind(&new.address)
        .bind(new.age)
        .bind(joining_date_today())
        .bind(&new.registration_type)
        .fetch_one(&self.pool)
        .await
        .map_err(FrontDeskError::StoreQuery)
    }

    /// Overwrite the mutable fields of the addressed patient.
    ///
    /// Addressing a `patient_id` that does not exist is a no-op; the edit
    /// form still receives its acknowledgement.
    pub async fn update(&self, update: PatientUpdate) -> FrontDeskResult<()> {
        let result = sqlx::query(
            r#"UPDATE patients
               SET ssn = ?, name = ?, age = ?, address = ?, registration_type = ?
               WHERE patient_id = ?"#,
        )
        .bind(update.ssn)
        .bind(&update.name)
        .bind(update.age)
        .bind(&update.address)
        .bind(&update.registration_type)
        .bind(update.patient_id)
        .execute(&self.pool)
        .await
        .map_err(FrontDeskError::StoreQuery)?;

        if result.rows_affected() == 0 {
            tracing::warn!(patient_id = update.patient_id, "update addressed no row");
        }

        Ok(())
    }
}

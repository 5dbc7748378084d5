//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{BloodType, Gender, Patient, PatientFields};

const PATIENT_COLUMNS: &str = "patient_id, name, age, gender, contact, address, \
                               blood_type, medical_history, registered_date";

fn row_to_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let gender: String = row.get(3)?;
    let address: String = row.get(5)?;
    let blood_type: String = row.get(6)?;
    let medical_history: String = row.get(7)?;

    Ok(Patient {
        patient_id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        // Values written before enum validation existed decode as empty
        gender: Gender::parse(&gender),
        contact: row.get(4)?,
        address: opt_text(address),
        blood_type: BloodType::parse(&blood_type),
        medical_history: opt_text(medical_history),
        registered_date: row.get(8)?,
    })
}

fn opt_text(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Database {
    /// Insert a new patient.
    ///
    /// The identifier is first claimed in `issued_patient_ids`, which keeps
    /// every ID ever handed out; a previously issued `patient_id` (live or
    /// deleted) surfaces as [`DbError::Constraint`] so the store can retry
    /// with a fresh one.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        let claimed = self.conn.execute(
            "INSERT OR IGNORE INTO issued_patient_ids (patient_id) VALUES (?)",
            [&patient.patient_id],
        )?;
        if claimed == 0 {
            return Err(DbError::Constraint(format!(
                "patient ID already issued: {}",
                patient.patient_id
            )));
        }

        let result = self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, age, gender, contact, address,
                blood_type, medical_history, registered_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.age,
                patient.gender.map(|g| g.as_str()).unwrap_or(""),
                patient.contact,
                patient.address.as_deref().unwrap_or(""),
                patient.blood_type.map(|b| b.as_str()).unwrap_or(""),
                patient.medical_history.as_deref().unwrap_or(""),
                patient.registered_date,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DbError::Constraint(format!(
                    "patient ID already exists: {}",
                    patient.patient_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the mutable fields of an existing patient.
    ///
    /// `patient_id` and `registered_date` are never written by this
    /// statement. Returns false when no record matched.
    pub fn update_patient(&self, patient_id: &str, fields: &PatientFields) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                age = ?3,
                gender = ?4,
                contact = ?5,
                address = ?6,
                blood_type = ?7,
                medical_history = ?8
            WHERE patient_id = ?1
            "#,
            params![
                patient_id,
                fields.name,
                fields.age,
                fields.gender.map(|g| g.as_str()).unwrap_or(""),
                fields.contact,
                fields.address.as_deref().unwrap_or(""),
                fields.blood_type.map(|b| b.as_str()).unwrap_or(""),
                fields.medical_history.as_deref().unwrap_or(""),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?"),
                [patient_id],
                row_to_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients, most recently registered first.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY registered_date DESC"
        ))?;

        let rows = stmt.query_map([], row_to_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search patients by name, patient ID, or contact (substring match).
    pub fn search_patients(&self, term: &str) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", term);
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PATIENT_COLUMNS} FROM patients
            WHERE name LIKE ?1 OR patient_id LIKE ?1 OR contact LIKE ?1
            ORDER BY registered_date DESC
            "#
        ))?;

        let rows = stmt.query_map([pattern], row_to_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Returns false when no record matched.
    pub fn delete_patient(&self, patient_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE patient_id = ?", [patient_id])?;
        Ok(rows_affected > 0)
    }
}

//! SQLite schema definition.

/// Complete database schema for the hospital records store.
///
/// All four front-end-visible tables live here so the store is the single
/// authoritative initializer; every statement is idempotent.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL DEFAULT '',
    contact TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    blood_type TEXT NOT NULL DEFAULT '',
    medical_history TEXT NOT NULL DEFAULT '',
    registered_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patients_registered ON patients(registered_date);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- Every identifier ever handed out. Rows are never deleted, so an ID
-- cannot be reissued after the patient record itself is removed.
CREATE TABLE IF NOT EXISTS issued_patient_ids (
    patient_id TEXT PRIMARY KEY
);

-- ============================================================================
-- Appointments (schema placeholder - no scheduling logic yet)
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    doctor_name TEXT,
    date TEXT,
    time TEXT,
    reason TEXT,
    status TEXT NOT NULL DEFAULT 'Scheduled'
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);

-- ============================================================================
-- Bills (schema placeholder - no billing logic yet)
-- ============================================================================

CREATE TABLE IF NOT EXISTS bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    amount REAL,
    date_issued TEXT,
    date_paid TEXT,
    status TEXT NOT NULL DEFAULT 'Unpaid',
    services TEXT
);

CREATE INDEX IF NOT EXISTS idx_bills_patient ON bills(patient_id);
CREATE INDEX IF NOT EXISTS idx_bills_status ON bills(status);

-- ============================================================================
-- Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        // Running the batch again must be a no-op, not an error
        conn.execute_batch(SCHEMA).unwrap();
    }

    #[test]
    fn test_placeholder_status_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (patient_id, name, age, contact, registered_date)
             VALUES ('P1', 'Max', 40, '555', '2024-01-01')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO appointments (patient_id, doctor_name) VALUES ('P1', 'Dr. Ali')",
            [],
        )
        .unwrap();
        let status: String = conn
            .query_row("SELECT status FROM appointments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "Scheduled");

        conn.execute("INSERT INTO bills (patient_id, amount) VALUES ('P1', 50.0)", [])
            .unwrap();
        let status: String = conn
            .query_row("SELECT status FROM bills", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "Unpaid");
    }

    #[test]
    fn test_patient_id_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (patient_id, name, age, contact, registered_date)
             VALUES ('P1', 'Max', 40, '555', '2024-01-01')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO patients (patient_id, name, age, contact, registered_date)
             VALUES ('P1', 'Other', 30, '556', '2024-01-02')",
            [],
        );
        assert!(result.is_err());
    }
}

//! Patient records store.
//!
//! The store owns the database handle and the in-memory activity feed. It
//! validates form input, assigns identifiers, and exposes the CRUD surface
//! that presentation adapters call synchronously.

mod activity;
mod validate;

pub use activity::*;
pub use validate::*;

use chrono::Local;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{Database, DashboardStats, DbError};
use crate::models::{Patient, PatientDraft};

/// Errors surfaced by store operations.
///
/// None of these are fatal: callers report the message and keep running.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no patient record with ID {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How many identifier collisions to absorb before giving up.
const MAX_ID_ATTEMPTS: u32 = 5;

/// The patient records store.
///
/// Constructed once per process and passed by reference to whichever
/// front end issues operations.
pub struct PatientStore {
    db: Database,
    activity: ActivityLog,
}

impl PatientStore {
    /// Open the store backed by the database at `path`, creating the file
    /// and schema as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self {
            db: Database::open(path)?,
            activity: ActivityLog::new(),
        })
    }

    /// Open a store backed by an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
            activity: ActivityLog::new(),
        })
    }

    /// Register a new patient.
    ///
    /// Validates the draft, assigns a fresh `patient_id` and today's
    /// `registered_date`, and persists the record. The stored record is
    /// returned so the caller can read the new identifier from it.
    pub fn register(&mut self, draft: &PatientDraft) -> StoreResult<Patient> {
        let fields = validate_draft(draft)?;
        let registered_date = Local::now().format("%Y-%m-%d").to_string();

        let mut patient = Patient::new(new_patient_id(), registered_date, fields);
        let mut attempts = 0;
        loop {
            match self.db.insert_patient(&patient) {
                Ok(()) => break,
                Err(DbError::Constraint(_)) if attempts < MAX_ID_ATTEMPTS => {
                    // Same-second registration; retry with a random suffix
                    attempts += 1;
                    warn!(patient_id = %patient.patient_id, "patient ID collision, retrying");
                    patient.patient_id = disambiguated_patient_id();
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(patient_id = %patient.patient_id, "registered patient");
        self.activity.record(format!(
            "Registered new patient: {} (ID: {})",
            patient.name, patient.patient_id
        ));
        Ok(patient)
    }

    /// Replace the mutable fields of an existing patient.
    ///
    /// `patient_id` and `registered_date` are never altered, whatever the
    /// draft contains.
    pub fn update(&mut self, patient_id: &str, draft: &PatientDraft) -> StoreResult<()> {
        let fields = validate_draft(draft)?;

        if !self.db.update_patient(patient_id, &fields)? {
            return Err(StoreError::NotFound(patient_id.to_string()));
        }

        info!(patient_id, "updated patient");
        self.activity.record(format!(
            "Updated patient record: {} (ID: {})",
            fields.name, patient_id
        ));
        Ok(())
    }

    /// Permanently remove a patient record.
    ///
    /// Obtaining user confirmation first is the caller's responsibility.
    pub fn delete(&mut self, patient_id: &str) -> StoreResult<()> {
        let patient = self.get(patient_id)?;

        if !self.db.delete_patient(patient_id)? {
            return Err(StoreError::NotFound(patient_id.to_string()));
        }

        info!(patient_id, "deleted patient");
        self.activity.record(format!(
            "Deleted patient record: {} (ID: {})",
            patient.name, patient.patient_id
        ));
        Ok(())
    }

    /// Exact-match lookup by identifier.
    pub fn get(&self, patient_id: &str) -> StoreResult<Patient> {
        self.db
            .get_patient(patient_id)?
            .ok_or_else(|| StoreError::NotFound(patient_id.to_string()))
    }

    /// All records, most recently registered first.
    pub fn list(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.db.list_patients()?)
    }

    /// Case-insensitive substring search over name, patient ID, and
    /// contact. A blank term behaves exactly like [`list`](Self::list).
    pub fn search(&self, term: &str) -> StoreResult<Vec<Patient>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list();
        }
        Ok(self.db.search_patients(term)?)
    }

    /// Headline dashboard figures.
    pub fn dashboard(&self) -> StoreResult<DashboardStats> {
        Ok(self.db.dashboard_stats()?)
    }

    /// The activity feed produced by this process's mutating operations.
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}

/// Human-readable patient ID derived from the local clock.
fn new_patient_id() -> String {
    format!("P{}", Local::now().format("%Y%m%d%H%M%S"))
}

/// Collision fallback: the same clock-derived base plus a random suffix.
fn disambiguated_patient_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", new_patient_id(), &suffix[..6])
}

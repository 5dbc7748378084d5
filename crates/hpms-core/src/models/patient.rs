//! Patient models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Patient gender, as recorded on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse a form value, case-insensitively. Empty or unknown input is None.
    pub fn parse(value: &str) -> Option<Gender> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ABO/Rh blood type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
    Unknown,
}

impl BloodType {
    pub const ALL: [BloodType; 9] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::Unknown => "Unknown",
        }
    }

    /// Parse a form value, case-insensitively. Empty or unknown input is None.
    pub fn parse(value: &str) -> Option<BloodType> {
        BloodType::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique human-readable identifier, assigned at registration
    pub patient_id: String,
    /// Full name
    pub name: String,
    /// Age in years, within [1, 150]
    pub age: i64,
    pub gender: Option<Gender>,
    /// Contact number or address
    pub contact: String,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    /// Free-text clinical notes, possibly multi-line
    pub medical_history: Option<String>,
    /// ISO calendar date of registration, immutable
    pub registered_date: String,
}

impl Patient {
    /// Assemble a record from an assigned identity and validated fields.
    pub fn new(patient_id: String, registered_date: String, fields: PatientFields) -> Self {
        Self {
            patient_id,
            name: fields.name,
            age: fields.age,
            gender: fields.gender,
            contact: fields.contact,
            address: fields.address,
            blood_type: fields.blood_type,
            medical_history: fields.medical_history,
            registered_date,
        }
    }
}

/// The validated, typed set of mutable patient fields.
///
/// Everything a form may change; `patient_id` and `registered_date` are
/// deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFields {
    pub name: String,
    pub age: i64,
    pub gender: Option<Gender>,
    pub contact: String,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub medical_history: Option<String>,
}

/// Raw form input for registration and updates.
///
/// Fields arrive exactly as collected from a form: age is text until
/// validation parses it, and blank strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub address: String,
    pub blood_type: String,
    pub medical_history: String,
}

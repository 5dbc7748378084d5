//! Form-input validation for patient records.
//!
//! Checks run in the order the registration form reports them: required
//! fields first, then the age parse and bounds, then the enumerated fields.

use thiserror::Error;

use crate::models::{BloodType, Gender, PatientDraft, PatientFields};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;

/// A field rule the input broke. Nothing is persisted when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is a required field")]
    MissingField(&'static str),

    #[error("age must be a valid number between 1 and 150, got {0:?}")]
    InvalidAge(String),

    #[error("unrecognized gender {0:?} (expected Male, Female, or Other)")]
    InvalidGender(String),

    #[error("unrecognized blood type {0:?}")]
    InvalidBloodType(String),
}

/// Validate a form draft, producing the typed mutable field set.
pub fn validate_draft(draft: &PatientDraft) -> Result<PatientFields, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let age_raw = draft.age.trim();
    if age_raw.is_empty() {
        return Err(ValidationError::MissingField("age"));
    }
    let contact = draft.contact.trim();
    if contact.is_empty() {
        return Err(ValidationError::MissingField("contact"));
    }

    let age: i64 = age_raw
        .parse()
        .map_err(|_| ValidationError::InvalidAge(age_raw.to_string()))?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::InvalidAge(age_raw.to_string()));
    }

    let gender = match draft.gender.trim() {
        "" => None,
        raw => Some(Gender::parse(raw).ok_or_else(|| ValidationError::InvalidGender(raw.into()))?),
    };
    let blood_type = match draft.blood_type.trim() {
        "" => None,
        raw => {
            Some(BloodType::parse(raw).ok_or_else(|| ValidationError::InvalidBloodType(raw.into()))?)
        }
    };

    Ok(PatientFields {
        name: name.to_string(),
        age,
        gender,
        contact: contact.to_string(),
        address: opt_trimmed(&draft.address),
        blood_type,
        medical_history: opt_trimmed(&draft.medical_history),
    })
}

fn opt_trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_draft() -> PatientDraft {
        PatientDraft {
            name: "Asha Ali".into(),
            age: "34".into(),
            gender: "Female".into(),
            contact: "555-0101".into(),
            address: "12 Harbor Lane".into(),
            blood_type: "O+".into(),
            medical_history: "Asthma since 2019\nSeasonal allergies".into(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let fields = validate_draft(&valid_draft()).unwrap();
        assert_eq!(fields.name, "Asha Ali");
        assert_eq!(fields.age, 34);
        assert_eq!(fields.gender, Some(Gender::Female));
        assert_eq!(fields.blood_type, Some(BloodType::OPositive));
        // Interior newlines survive; only the edges are trimmed
        assert_eq!(
            fields.medical_history.as_deref(),
            Some("Asthma since 2019\nSeasonal allergies")
        );
    }

    #[test]
    fn test_missing_required_fields() {
        for (field, blank) in [("name", "  "), ("age", ""), ("contact", "\t")] {
            let mut draft = valid_draft();
            match field {
                "name" => draft.name = blank.into(),
                "age" => draft.age = blank.into(),
                _ => draft.contact = blank.into(),
            }
            assert_eq!(
                validate_draft(&draft),
                Err(ValidationError::MissingField(field)),
                "expected missing-field error for {field}"
            );
        }
    }

    #[test]
    fn test_required_fields_checked_before_age_parse() {
        // A blank name must win over a garbage age
        let mut draft = valid_draft();
        draft.name = "".into();
        draft.age = "abc".into();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        for bad in ["abc", "12.5", "1e3", "-", "thirty"] {
            let mut draft = valid_draft();
            draft.age = bad.into();
            assert_eq!(
                validate_draft(&draft),
                Err(ValidationError::InvalidAge(bad.into())),
                "expected invalid-age error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_age_bounds() {
        for bad in ["0", "-3", "151", "9000"] {
            let mut draft = valid_draft();
            draft.age = bad.into();
            assert!(matches!(
                validate_draft(&draft),
                Err(ValidationError::InvalidAge(_))
            ));
        }
        for good in ["1", "150"] {
            let mut draft = valid_draft();
            draft.age = good.into();
            assert!(validate_draft(&draft).is_ok());
        }
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        let mut draft = valid_draft();
        draft.gender = "Robot".into();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::InvalidGender("Robot".into()))
        );

        let mut draft = valid_draft();
        draft.blood_type = "C+".into();
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::InvalidBloodType("C+".into()))
        );
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut draft = valid_draft();
        draft.gender = "".into();
        draft.address = "   ".into();
        draft.blood_type = "".into();
        draft.medical_history = "\n".into();

        let fields = validate_draft(&draft).unwrap();
        assert_eq!(fields.gender, None);
        assert_eq!(fields.address, None);
        assert_eq!(fields.blood_type, None);
        assert_eq!(fields.medical_history, None);
    }

    proptest! {
        #[test]
        fn prop_in_range_ages_accepted(age in MIN_AGE..=MAX_AGE) {
            let mut draft = valid_draft();
            draft.age = age.to_string();
            let fields = validate_draft(&draft).unwrap();
            prop_assert_eq!(fields.age, age);
        }

        #[test]
        fn prop_out_of_range_ages_rejected(age in prop_oneof![
            i64::MIN..MIN_AGE,
            (MAX_AGE + 1)..=i64::MAX,
        ]) {
            let mut draft = valid_draft();
            draft.age = age.to_string();
            prop_assert!(matches!(
                validate_draft(&draft),
                Err(ValidationError::InvalidAge(_))
            ));
        }
    }
}

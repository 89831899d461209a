//! Admission (encounter) entity.

use crate::error::{DomainError, Result};
use chrono::NaiveDateTime;

const VALID_PATIENT_CLASSES: &[&str] = &["I", "O", "E"];

/// A hospital encounter tied to one patient. Maps onto PV1.
#[derive(Debug, Clone)]
pub struct Admission {
    pub id: String,
    pub patient_id: String,
    pub patient_class: String,
    pub admit_datetime: NaiveDateTime,
    pub discharge_datetime: Option<NaiveDateTime>,
    pub ward: String,
    pub room: String,
    pub attending_doctor_id: String,
}

impl Admission {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        patient_id: &str,
        patient_class: &str,
        admit_datetime: &str,
        discharge_datetime: &str,
        ward: &str,
        room: &str,
        attending_doctor_id: &str,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(DomainError::new("Admission", "id", id, "must not be empty"));
        }
        if patient_id.trim().is_empty() {
            return Err(DomainError::new(
                "Admission",
                "patient_id",
                patient_id,
                "must not be empty",
            ));
        }
        if !VALID_PATIENT_CLASSES.contains(&patient_class) {
            return Err(DomainError::new(
                "Admission",
                "patient_class",
                patient_class,
                "must be one of I, O, E",
            ));
        }

        let admit = parse_datetime(admit_datetime)
            .ok_or_else(|| DomainError::new("Admission", "admit_datetime", admit_datetime, "must be YYYYMMDDHHMMSS"))?;

        let discharge = if discharge_datetime.trim().is_empty() {
            None
        } else {
            let parsed = parse_datetime(discharge_datetime).ok_or_else(|| {
                DomainError::new(
                    "Admission",
                    "discharge_datetime",
                    discharge_datetime,
                    "must be YYYYMMDDHHMMSS",
                )
            })?;
            if parsed < admit {
                return Err(DomainError::new(
                    "Admission",
                    "discharge_datetime",
                    discharge_datetime,
                    "must be on or after admit_datetime",
                ));
            }
            Some(parsed)
        };

        if attending_doctor_id.trim().is_empty() {
            return Err(DomainError::new(
                "Admission",
                "attending_doctor_id",
                attending_doctor_id,
                "must not be empty",
            ));
        }

        Ok(Self {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            patient_class: patient_class.to_string(),
            admit_datetime: admit,
            discharge_datetime: discharge,
            ward: ward.to_string(),
            room: room.to_string(),
            attending_doctor_id: attending_doctor_id.to_string(),
        })
    }

    pub fn is_discharged(&self) -> bool {
        self.discharge_datetime.is_some()
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admission() -> Result<Admission> {
        Admission::new(
            "ADM1",
            "P001",
            "I",
            "20240101100000",
            "",
            "3F",
            "301",
            "DOC1",
        )
    }

    #[test]
    fn test_valid_admission() {
        let a = admission().unwrap();
        assert!(!a.is_discharged());
    }

    #[test]
    fn test_invalid_patient_class_rejected() {
        assert!(Admission::new("ADM1", "P001", "Z", "20240101100000", "", "3F", "301", "DOC1").is_err());
    }

    #[test]
    fn test_discharge_before_admit_rejected() {
        assert!(Admission::new(
            "ADM1",
            "P001",
            "I",
            "20240101100000",
            "20230101100000",
            "3F",
            "301",
            "DOC1"
        )
        .is_err());
    }

    #[test]
    fn test_discharge_on_or_after_admit_accepted() {
        let a = Admission::new(
            "ADM1",
            "P001",
            "I",
            "20240101100000",
            "20240105100000",
            "3F",
            "301",
            "DOC1",
        )
        .unwrap();
        assert!(a.is_discharged());
    }
}

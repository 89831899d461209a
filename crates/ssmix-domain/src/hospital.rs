//! Hospital (sending facility) entity.

use crate::error::{DomainError, Result};

/// The facility this generator is producing records on behalf of. One
/// instance is shared process-wide: every message in a run carries the
/// same MSH-4/MSH-6 facility identifier.
#[derive(Debug, Clone)]
pub struct Hospital {
    pub facility_id: String,
    pub name: String,
    pub department_codes: Vec<String>,
}

impl Hospital {
    pub fn new(facility_id: &str, name: &str, department_codes: Vec<String>) -> Result<Self> {
        if facility_id.trim().is_empty() {
            return Err(DomainError::new(
                "Hospital",
                "facility_id",
                facility_id,
                "must not be empty",
            ));
        }
        if name.trim().is_empty() {
            return Err(DomainError::new("Hospital", "name", name, "must not be empty"));
        }
        if department_codes.iter().any(|d| d.trim().is_empty()) {
            return Err(DomainError::new(
                "Hospital",
                "department_codes",
                department_codes.join(","),
                "entries must not be empty",
            ));
        }
        Ok(Self {
            facility_id: facility_id.to_string(),
            name: name.to_string(),
            department_codes,
        })
    }

    pub fn has_department(&self, code: &str) -> bool {
        self.department_codes.iter().any(|d| d == code)
    }

    /// The process-wide facility constant for a single generation run.
    /// No input table carries hospital data; every message in a run
    /// shares this one sending facility.
    pub fn generation_default() -> Self {
        Self {
            facility_id: "SSMIXGEN".to_string(),
            name: "SS-MIX2 Synthetic Generator Hospital".to_string(),
            department_codes: vec!["INT".to_string(), "SUR".to_string(), "PED".to_string()],
        }
    }
}

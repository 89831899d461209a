//! Specimen entity, backing SPM segments under an OML^O33 order.

use crate::error::{DomainError, Result};
use chrono::NaiveDateTime;

const VALID_SPECIMEN_TYPES: &[&str] = &["BLD", "URN", "STL", "SER", "PLS", "SPT", "SWB"];

#[derive(Debug, Clone)]
pub struct Specimen {
    pub id: String,
    pub specimen_type: String,
    pub collection_datetime: NaiveDateTime,
}

impl Specimen {
    pub fn new(id: &str, specimen_type: &str, collection_datetime: &str) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(DomainError::new("Specimen", "id", id, "must not be empty"));
        }
        if !VALID_SPECIMEN_TYPES.contains(&specimen_type) {
            return Err(DomainError::new(
                "Specimen",
                "specimen_type",
                specimen_type,
                "must be a recognized specimen type code",
            ));
        }
        let collected = NaiveDateTime::parse_from_str(collection_datetime, "%Y%m%d%H%M%S").map_err(|_| {
            DomainError::new(
                "Specimen",
                "collection_datetime",
                collection_datetime,
                "must be YYYYMMDDHHMMSS",
            )
        })?;
        Ok(Self {
            id: id.to_string(),
            specimen_type: specimen_type.to_string(),
            collection_datetime: collected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_specimen() {
        assert!(Specimen::new("SPEC1", "BLD", "20240101100000").is_ok());
    }

    #[test]
    fn test_unknown_specimen_type_rejected() {
        assert!(Specimen::new("SPEC1", "ZZZ", "20240101100000").is_err());
    }

    #[test]
    fn test_unparseable_collection_datetime_rejected() {
        assert!(Specimen::new("SPEC1", "BLD", "not-a-date").is_err());
    }
}

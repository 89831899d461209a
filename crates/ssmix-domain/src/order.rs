//! Order (prescription / injection) entity, backing OMP^O09.

use crate::error::{DomainError, Result};
use chrono::NaiveDateTime;

const VALID_STATUSES: &[&str] = &["NW", "CM", "CA", "DC"];

/// The RXE-3 minimum-dose field is a tri-state HL7 numeric: absent (no
/// range was prescribed), the quoted-null `""` (a range applies but no
/// minimum was determined), or an ordinary numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimumDose {
    Absent,
    Undetermined,
    Value(String),
}

/// A medication order: a prescription or an injection, the two order
/// kinds this generator distinguishes only by their drug catalog, not by
/// their structure.
#[derive(Debug, Clone)]
pub struct Order {
    pub placer_order_number: String,
    pub filler_order_number: String,
    pub patient_id: String,
    pub status: String,
    pub ordering_provider_id: String,
    pub drug_code: String,
    pub drug_name: String,
    pub dose: String,
    pub dose_unit: String,
    pub minimum_dose: MinimumDose,
    pub route: String,
    pub frequency: String,
    pub order_datetime: NaiveDateTime,
    pub start_datetime: Option<NaiveDateTime>,
    pub stop_datetime: Option<NaiveDateTime>,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        placer_order_number: &str,
        filler_order_number: &str,
        patient_id: &str,
        status: &str,
        ordering_provider_id: &str,
        drug_code: &str,
        drug_name: &str,
        dose: &str,
        dose_unit: &str,
        route: &str,
        frequency: &str,
        order_datetime: &str,
        start_datetime: &str,
        stop_datetime: &str,
    ) -> Result<Self> {
        if placer_order_number.trim().is_empty() {
            return Err(DomainError::new(
                "Order",
                "placer_order_number",
                placer_order_number,
                "must not be empty",
            ));
        }
        if patient_id.trim().is_empty() {
            return Err(DomainError::new("Order", "patient_id", patient_id, "must not be empty"));
        }
        if !VALID_STATUSES.contains(&status) {
            return Err(DomainError::new(
                "Order",
                "status",
                status,
                "must be one of NW, CM, CA, DC",
            ));
        }
        if drug_code.trim().is_empty() {
            return Err(DomainError::new("Order", "drug_code", drug_code, "must not be empty"));
        }
        if dose.trim().is_empty() {
            return Err(DomainError::new("Order", "dose", dose, "must not be empty"));
        }

        let order_dt = parse_datetime(order_datetime)
            .ok_or_else(|| DomainError::new("Order", "order_datetime", order_datetime, "must be YYYYMMDDHHMMSS"))?;

        let start = parse_optional_datetime(start_datetime, "Order", "start_datetime")?;
        let stop = parse_optional_datetime(stop_datetime, "Order", "stop_datetime")?;

        if let (Some(start), Some(stop)) = (start, stop) {
            if stop < start {
                return Err(DomainError::new(
                    "Order",
                    "stop_datetime",
                    stop_datetime,
                    "must be on or after start_datetime",
                ));
            }
        }

        Ok(Self {
            placer_order_number: placer_order_number.to_string(),
            filler_order_number: filler_order_number.to_string(),
            patient_id: patient_id.to_string(),
            status: status.to_string(),
            ordering_provider_id: ordering_provider_id.to_string(),
            drug_code: drug_code.to_string(),
            drug_name: drug_name.to_string(),
            dose: dose.to_string(),
            dose_unit: dose_unit.to_string(),
            minimum_dose: MinimumDose::Absent,
            route: route.to_string(),
            frequency: frequency.to_string(),
            order_datetime: order_dt,
            start_datetime: start,
            stop_datetime: stop,
        })
    }

    pub fn with_minimum_dose(mut self, minimum_dose: MinimumDose) -> Self {
        self.minimum_dose = minimum_dose;
        self
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S").ok()
}

fn parse_optional_datetime(s: &str, entity: &'static str, attribute: &'static str) -> Result<Option<NaiveDateTime>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_datetime(s)
        .map(Some)
        .ok_or_else(|| DomainError::new(entity, attribute, s, "must be YYYYMMDDHHMMSS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Result<Order> {
        Order::new(
            "ORD1",
            "FILL1",
            "P001",
            "NW",
            "DOC1",
            "D001",
            "Amoxicillin",
            "500",
            "mg",
            "PO",
            "TID",
            "20240101100000",
            "20240101120000",
            "20240108120000",
        )
    }

    #[test]
    fn test_valid_order() {
        let o = order().unwrap();
        assert_eq!(o.minimum_dose, MinimumDose::Absent);
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(Order::new(
            "ORD1", "FILL1", "P001", "ZZ", "DOC1", "D001", "Amoxicillin", "500", "mg", "PO", "TID",
            "20240101100000", "", ""
        )
        .is_err());
    }

    #[test]
    fn test_stop_before_start_rejected() {
        assert!(Order::new(
            "ORD1", "FILL1", "P001", "NW", "DOC1", "D001", "Amoxicillin", "500", "mg", "PO", "TID",
            "20240101100000", "20240108120000", "20240101120000"
        )
        .is_err());
    }

    #[test]
    fn test_minimum_dose_undetermined() {
        let o = order().unwrap().with_minimum_dose(MinimumDose::Undetermined);
        assert_eq!(o.minimum_dose, MinimumDose::Undetermined);
    }
}

//! Eager, non-fail-fast validation of tabular input rows.
//!
//! The driver sweeps every input table, constructs each row's entity, and
//! collects **all** violations rather than stopping at the first one. The
//! resulting [`ValidationReport`] is what a caller serializes to
//! `validation_errors.json`; generation proceeds only once it is empty.
//!
//! When a caller asserts inputs are already validated, this sweep is
//! skipped entirely by the caller (see `ssmix-cli`'s `--already-validated`
//! flag) and entity construction is left to fail fast at the first
//! offense instead.

use serde::{Deserialize, Serialize};
use ssmix_domain::{Admission, DomainError, LabTest, Observation, Order, Patient, Specimen};
use std::collections::HashMap;

/// One tabular input row, loosely typed. Reader collaborators (e.g. a
/// CSV loader) produce these; this crate performs no file I/O itself.
pub type Row = HashMap<String, String>;

fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// One input-validation failure: a row reference, the offending field,
/// the rule that rejected it, and the value observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub table: String,
    pub row: usize,
    pub entity: String,
    pub field: String,
    pub rule: String,
    pub value: String,
}

impl ValidationEntry {
    fn from_domain_error(table: &str, row: usize, error: DomainError) -> Self {
        Self {
            table: table.to_string(),
            row,
            entity: error.entity.to_string(),
            field: error.attribute.to_string(),
            rule: error.rule.to_string(),
            value: error.value,
        }
    }
}

/// The accumulated result of a validation sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub entries: Vec<ValidationEntry>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: ValidationEntry) {
        self.entries.push(entry);
    }

    /// Serialize to the pretty JSON form written out as `validation_errors.json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Driver that sweeps tabular rows into entities, collecting every
/// violation instead of stopping at the first one.
pub struct ValidationDriver {
    report: ValidationReport,
}

impl Default for ValidationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationDriver {
    pub fn new() -> Self {
        Self {
            report: ValidationReport::new(),
        }
    }

    pub fn validate_patients(&mut self, rows: &[Row]) -> Vec<Patient> {
        let mut patients = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Patient::new(
                field(row, "id"),
                field(row, "sex"),
                field(row, "birth_date"),
                field(row, "death_date"),
            ) {
                Ok(p) => patients.push(p),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("patients", i, e)),
            }
        }
        patients
    }

    pub fn validate_admissions(&mut self, rows: &[Row]) -> Vec<Admission> {
        let mut admissions = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Admission::new(
                field(row, "id"),
                field(row, "patient_id"),
                field(row, "patient_class"),
                field(row, "admit_datetime"),
                field(row, "discharge_datetime"),
                field(row, "ward"),
                field(row, "room"),
                field(row, "attending_doctor_id"),
            ) {
                Ok(a) => admissions.push(a),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("admissions", i, e)),
            }
        }
        admissions
    }

    #[allow(clippy::too_many_lines)]
    pub fn validate_orders(&mut self, rows: &[Row]) -> Vec<Order> {
        let mut orders = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Order::new(
                field(row, "placer_order_number"),
                field(row, "filler_order_number"),
                field(row, "patient_id"),
                field(row, "status"),
                field(row, "ordering_provider_id"),
                field(row, "drug_code"),
                field(row, "drug_name"),
                field(row, "dose"),
                field(row, "dose_unit"),
                field(row, "route"),
                field(row, "frequency"),
                field(row, "order_datetime"),
                field(row, "start_datetime"),
                field(row, "stop_datetime"),
            ) {
                Ok(o) => orders.push(o),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("orders", i, e)),
            }
        }
        orders
    }

    pub fn validate_specimens(&mut self, rows: &[Row]) -> Vec<Specimen> {
        let mut specimens = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Specimen::new(
                field(row, "id"),
                field(row, "specimen_type"),
                field(row, "collection_datetime"),
            ) {
                Ok(s) => specimens.push(s),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("specimens", i, e)),
            }
        }
        specimens
    }

    /// Validates lab tests, pulling in already-validated specimens by the
    /// `specimen_ids` column (semicolon-separated IDs into `specimens`).
    pub fn validate_lab_tests(&mut self, rows: &[Row], specimens: &[Specimen]) -> Vec<LabTest> {
        let mut lab_tests = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let wanted_ids: Vec<&str> = field(row, "specimen_ids").split(';').filter(|s| !s.is_empty()).collect();
            let matched: Vec<Specimen> = specimens
                .iter()
                .filter(|s| wanted_ids.contains(&s.id.as_str()))
                .cloned()
                .collect();
            match LabTest::new(
                field(row, "placer_order_number"),
                field(row, "filler_order_number"),
                field(row, "patient_id"),
                field(row, "panel_code"),
                field(row, "panel_name"),
                field(row, "ordered_datetime"),
                matched,
            ) {
                Ok(t) => lab_tests.push(t),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("lab_tests", i, e)),
            }
        }
        lab_tests
    }

    pub fn validate_observations(&mut self, rows: &[Row]) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let set_id: u32 = field(row, "set_id").parse().unwrap_or(0);
            match Observation::new(
                set_id,
                field(row, "value_type"),
                field(row, "identifier"),
                field(row, "value"),
                field(row, "units"),
                field(row, "reference_range"),
                field(row, "abnormal_flag"),
                field(row, "status"),
            ) {
                Ok(o) => observations.push(o),
                Err(e) => self.report.push(ValidationEntry::from_domain_error("observations", i, e)),
            }
        }
        observations
    }

    /// Consumes the driver, returning the accumulated report.
    pub fn finish(self) -> ValidationReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_valid_patient_row_produces_no_errors() {
        let mut driver = ValidationDriver::new();
        let rows = vec![row(&[("id", "P001"), ("sex", "M"), ("birth_date", "19800101"), ("death_date", "")])];
        let patients = driver.validate_patients(&rows);
        assert_eq!(patients.len(), 1);
        assert!(driver.finish().is_valid());
    }

    #[test]
    fn test_invalid_rows_are_batched_not_fail_fast() {
        let mut driver = ValidationDriver::new();
        let rows = vec![
            row(&[("id", ""), ("sex", "M"), ("birth_date", "19800101"), ("death_date", "")]),
            row(&[("id", "P002"), ("sex", "Z"), ("birth_date", "19800101"), ("death_date", "")]),
            row(&[("id", "P003"), ("sex", "M"), ("birth_date", "19800101"), ("death_date", "")]),
        ];
        let patients = driver.validate_patients(&rows);
        assert_eq!(patients.len(), 1);
        let report = driver.finish();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].table, "patients");
        assert_eq!(report.entries[0].row, 0);
        assert_eq!(report.entries[1].row, 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut driver = ValidationDriver::new();
        let rows = vec![row(&[("id", ""), ("sex", "M"), ("birth_date", "19800101"), ("death_date", "")])];
        driver.validate_patients(&rows);
        let report = driver.finish();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"table\": \"patients\""));
    }

    #[test]
    fn test_lab_test_matches_specimens_by_id() {
        let mut driver = ValidationDriver::new();
        let specimen_rows = vec![row(&[("id", "SPEC1"), ("specimen_type", "BLD"), ("collection_datetime", "20240101100000")])];
        let specimens = driver.validate_specimens(&specimen_rows);
        let lab_rows = vec![row(&[
            ("placer_order_number", "ORD1"),
            ("filler_order_number", "FILL1"),
            ("patient_id", "P001"),
            ("panel_code", "CBC"),
            ("panel_name", "Complete Blood Count"),
            ("ordered_datetime", "20240101090000"),
            ("specimen_ids", "SPEC1"),
        ])];
        let lab_tests = driver.validate_lab_tests(&lab_rows, &specimens);
        assert_eq!(lab_tests.len(), 1);
        assert_eq!(lab_tests[0].specimens.len(), 1);
        assert!(driver.finish().is_valid());
    }
}

//! CSV-backed tabular input reader.
//!
//! Loads one file per entity class from `source_dir`. Rows are returned
//! loosely typed (`HashMap<String, String>`); this reader performs no
//! domain validation — malformed cells pass through as ordinary strings
//! and are rejected downstream by the validation driver.

use anyhow::{Context, Result};
use ssmix_validate::Row;
use std::path::Path;

pub struct InputTables {
    pub patients: Vec<Row>,
    pub admissions: Vec<Row>,
    pub orders: Vec<Row>,
    pub lab_tests: Vec<Row>,
    pub observations: Vec<Row>,
    pub specimens: Vec<Row>,
}

fn read_rows(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: Row = record.with_context(|| format!("failed to read row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load(source_dir: &Path) -> Result<InputTables> {
    Ok(InputTables {
        patients: read_rows(&source_dir.join("patients.csv"))?,
        admissions: read_rows(&source_dir.join("admissions.csv"))?,
        orders: read_rows(&source_dir.join("orders.csv"))?,
        lab_tests: read_rows(&source_dir.join("lab_tests.csv"))?,
        observations: read_rows(&source_dir.join("observations.csv"))?,
        specimens: read_rows(&source_dir.join("specimens.csv"))?,
    })
}

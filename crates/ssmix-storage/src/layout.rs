//! SS-MIX2 output tree layout.
//!
//! Path-bucketing scheme: patient directories nest directly under a date
//! bucket, `<patient_id>/<YYYYMMDD>/`, with no intermediate hash bucket —
//! isolated behind this module so the real SS-MIX2 convention can be
//! substituted later without touching callers.

use std::path::{Path, PathBuf};

/// Root directory name under `output_dir`.
pub const TREE_ROOT: &str = "ssmixtwins";

/// Directory a message for `patient_id` on `date` (YYYYMMDD) belongs under.
pub fn patient_date_dir(output_dir: &Path, patient_id: &str, date: &str) -> PathBuf {
    output_dir.join(TREE_ROOT).join(patient_id).join(date)
}

/// Builds an SS-MIX2 file name: message datetime, message-type code,
/// department code, a monotonically increasing index, and a category
/// suffix, joined with `_` and carrying no dot-extension (a documented
/// prior bug: real SS-MIX2 output has none either).
pub fn file_name(
    message_datetime: &str,
    message_type_code: &str,
    department_code: &str,
    index: u64,
    category_suffix: &str,
) -> String {
    format!("{message_datetime}_{message_type_code}_{department_code}_{index:06}_{category_suffix}")
}

/// Full path for a rendered message.
pub fn message_path(
    output_dir: &Path,
    patient_id: &str,
    date: &str,
    message_datetime: &str,
    message_type_code: &str,
    department_code: &str,
    index: u64,
    category_suffix: &str,
) -> PathBuf {
    patient_date_dir(output_dir, patient_id, date).join(file_name(
        message_datetime,
        message_type_code,
        department_code,
        index,
        category_suffix,
    ))
}

/// Path to the validation report, written at the output root rather than
/// under the message tree.
pub fn validation_report_path(output_dir: &Path) -> PathBuf {
    output_dir.join("validation_errors.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_date_dir_has_no_hash_bucket() {
        let dir = patient_date_dir(Path::new("/out"), "P001", "20240101");
        assert_eq!(dir, Path::new("/out/ssmixtwins/P001/20240101"));
    }

    #[test]
    fn test_file_name_has_no_dot_extension() {
        let name = file_name("20240101120000", "ADT", "INT", 1, "01");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_file_name_components_in_order() {
        let name = file_name("20240101120000", "ADT", "INT", 7, "01");
        assert_eq!(name, "20240101120000_ADT_INT_000007_01");
    }
}

//! HL7 segment structures

use crate::delimiters::Delimiters;
use crate::error::{Error, Result};
use crate::field::Field;

/// An HL7 segment
///
/// A segment consists of:
/// - A 3-character segment ID (e.g., "MSH", "PID", "OBX")
/// - Multiple fields separated by the field separator
///
/// Note: For MSH segments, the encoding is special:
/// - MSH|^~\&|... (field separator and encoding characters come first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment ID (3 characters, e.g., "MSH", "PID")
    pub id: String,
    /// Fields in the segment (excluding the segment ID)
    pub fields: Vec<Field>,
}

impl Segment {
    /// Create a new segment with the given ID
    pub fn new<S: Into<String>>(id: S) -> Self {
        let id = id.into();
        Self {
            id,
            fields: Vec::new(),
        }
    }

    /// Add a field to the segment
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Get a field by index (1-based, as per HL7 convention)
    ///
    /// Note: Field 0 is the segment ID itself
    pub fn get_field(&self, index: usize) -> Option<&Field> {
        if index == 0 {
            None // Field 0 is the segment ID, not a regular field
        } else {
            self.fields.get(index - 1)
        }
    }

    /// Get a mutable field by index (1-based)
    pub fn get_field_mut(&mut self, index: usize) -> Option<&mut Field> {
        if index == 0 {
            None
        } else {
            self.fields.get_mut(index - 1)
        }
    }

    /// Set a field value at the given index (1-based)
    ///
    /// This will extend the fields vector if necessary
    pub fn set_field(&mut self, index: usize, field: Field) -> Result<()> {
        if index == 0 {
            return Err(Error::InvalidFieldAccess(
                "Cannot set field 0 (segment ID)".to_string(),
            ));
        }

        let field_index = index - 1;

        // Extend fields vector if necessary
        while self.fields.len() <= field_index {
            self.fields.push(Field::new());
        }

        self.fields[field_index] = field;
        Ok(())
    }

    /// Get a field value as a string (convenience method)
    pub fn get_field_value(&self, index: usize) -> Option<&str> {
        self.get_field(index).and_then(|f| f.value())
    }

    /// Set a field from a simple string value
    pub fn set_field_value<S: Into<String>>(&mut self, index: usize, value: S) -> Result<()> {
        self.set_field(index, Field::from_value(value))
    }

    /// Get the number of fields (excluding segment ID)
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Encode the segment to HL7 format
    ///
    /// For MSH, `fields[0]` and `fields[1]` are reserved placeholders for
    /// MSH-1 (field separator) and MSH-2 (encoding characters), which are
    /// emitted here directly from `delimiters` rather than from their
    /// placeholder slots; real content starts at `fields[2]` (MSH-3), so
    /// that generic 1-based `get_field`/`set_field` addressing lines up
    /// with true MSH field numbers for every field from MSH-3 onward.
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        let mut result = self.id.clone();

        if self.id == "MSH" {
            result.push(delimiters.field_separator);
            result.push_str(&delimiters.encoding_characters());

            for field in self.fields.iter().skip(2) {
                result.push(delimiters.field_separator);
                result.push_str(&field.encode(delimiters));
            }
        } else {
            // Regular segments
            for field in &self.fields {
                result.push(delimiters.field_separator);
                result.push_str(&field.encode(delimiters));
            }
        }

        result
    }

    /// Validate segment ID (must be 3 alphanumeric characters)
    pub fn validate_id(&self) -> Result<()> {
        if self.id.len() != 3 {
            return Err(Error::InvalidSegment(format!(
                "Segment ID must be 3 characters, got: {}",
                self.id
            )));
        }

        if !self.id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidSegment(format!(
                "Segment ID must be alphanumeric, got: {}",
                self.id
            )));
        }

        Ok(())
    }
}

/// Segment type codes used by the four SS-MIX2 message profiles this
/// engine emits (ADT^A08, OMP^O09, OML^O33, ORU^R01).
pub mod types {
    /// Message Header segment
    pub const MSH: &str = "MSH";

    /// Event Type segment (ADT)
    pub const EVN: &str = "EVN";

    /// Patient Identification segment
    pub const PID: &str = "PID";

    /// Patient Visit segment
    pub const PV1: &str = "PV1";

    /// Common Order segment
    pub const ORC: &str = "ORC";

    /// Pharmacy/Treatment Encoded Order segment
    pub const RXE: &str = "RXE";

    /// Pharmacy/Treatment Order segment
    pub const RXO: &str = "RXO";

    /// Observation Request segment
    pub const OBR: &str = "OBR";

    /// Specimen segment
    pub const SPM: &str = "SPM";

    /// Observation/Result segment
    pub const OBX: &str = "OBX";

    /// Insurance segment
    pub const IN1: &str = "IN1";

    /// Allergy Information segment
    pub const AL1: &str = "AL1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_segment() {
        let segment = Segment::new("PID");
        assert_eq!(segment.id, "PID");
        assert_eq!(segment.fields.len(), 0);
    }

    #[test]
    fn test_add_field() {
        let mut segment = Segment::new("PID");
        segment.add_field(Field::from_value("12345"));
        assert_eq!(segment.fields.len(), 1);
    }

    #[test]
    fn test_get_field() {
        let mut segment = Segment::new("PID");
        segment.add_field(Field::from_value("12345"));

        assert_eq!(segment.get_field(1).unwrap().value(), Some("12345"));
        assert!(segment.get_field(0).is_none());
        assert!(segment.get_field(2).is_none());
    }

    #[test]
    fn test_set_field() {
        let mut segment = Segment::new("PID");
        segment.set_field_value(1, "12345").unwrap();
        segment.set_field_value(3, "Smith").unwrap();

        assert_eq!(segment.get_field_value(1), Some("12345"));
        assert_eq!(segment.get_field_value(3), Some("Smith"));
        // Field 2 should be empty but present
        assert_eq!(segment.fields.len(), 3);
    }

    #[test]
    fn test_encode_regular_segment() {
        let delims = Delimiters::default();
        let mut segment = Segment::new("PID");
        segment.add_field(Field::from_value("1"));
        segment.add_field(Field::from_value("12345"));
        segment.add_field(Field::from_value("Smith^John"));

        let encoded = segment.encode(&delims);
        assert!(encoded.starts_with("PID|"));
    }

    #[test]
    fn test_encode_msh_segment() {
        let delims = Delimiters::default();
        let mut segment = Segment::new("MSH");
        segment.add_field(Field::new()); // MSH-1 placeholder (rendered from delimiters, not this slot)
        segment.add_field(Field::from_value("^~\\&")); // MSH-2 placeholder (rendered from delimiters, not this slot)
        segment.add_field(Field::from_value("SendingApp")); // MSH-3
        segment.add_field(Field::from_value("ReceivingApp")); // MSH-5... values don't matter here

        let encoded = segment.encode(&delims);
        assert!(encoded.starts_with("MSH|^~\\&|SendingApp|"));
    }

    #[test]
    fn test_validate_id() {
        let valid = Segment::new("PID");
        assert!(valid.validate_id().is_ok());

        let invalid_length = Segment::new("PI");
        assert!(invalid_length.validate_id().is_err());

        let invalid_chars = Segment::new("PI!");
        assert!(invalid_chars.validate_id().is_err());
    }
}

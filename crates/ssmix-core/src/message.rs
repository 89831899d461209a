//! HL7 v2.5 message structures.

use crate::delimiters::Delimiters;
use crate::error::{Error, Result};
use crate::segment::Segment;
use crate::HL7_VERSION;

/// An HL7 message.
///
/// A message consists of multiple segments, starting with an MSH segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message segments
    pub segments: Vec<Segment>,
    /// Delimiters used in this message
    pub delimiters: Delimiters,
}

impl Message {
    /// Create a new empty message with default delimiters
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            delimiters: Delimiters::default(),
        }
    }

    /// Create a new message with custom delimiters
    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self {
            segments: Vec::new(),
            delimiters,
        }
    }

    /// Add a segment to the message
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Get a segment by index
    pub fn get_segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Get all segments with a specific ID
    pub fn get_segments_by_id(&self, id: &str) -> Vec<&Segment> {
        self.segments.iter().filter(|s| s.id == id).collect()
    }

    /// Get the MSH segment (should be the first segment)
    pub fn get_msh(&self) -> Option<&Segment> {
        self.segments.first().filter(|s| s.id == "MSH")
    }

    /// Get the message type from MSH-9
    ///
    /// MSH-9 format: MessageType^TriggerEvent (e.g., "ADT^A08")
    pub fn get_message_type(&self) -> Option<(String, String)> {
        self.get_msh().and_then(|msh| {
            msh.get_field(9).and_then(|field| {
                let rep = field.get_repetition(0)?;
                let msg_type = rep.get_component(0)?.value()?.to_string();
                let trigger = rep.get_component(1)?.value()?.to_string();
                Some((msg_type, trigger))
            })
        })
    }

    /// Get the message control ID from MSH-10
    pub fn get_control_id(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(10))
    }

    /// Get the HL7 version from MSH-12; this system always stamps `2.5`.
    pub fn get_version(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(12))
    }

    /// Get sending application from MSH-3
    pub fn get_sending_application(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(3))
    }

    /// Get sending facility from MSH-4
    pub fn get_sending_facility(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(4))
    }

    /// Get receiving application from MSH-5
    pub fn get_receiving_application(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(5))
    }

    /// Get receiving facility from MSH-6
    pub fn get_receiving_facility(&self) -> Option<&str> {
        self.get_msh().and_then(|msh| msh.get_field_value(6))
    }

    /// Validate the message structure: present segments, MSH first, all
    /// segment IDs well-formed, version pinned to 2.5, and delimiters
    /// internally consistent. This is the "profile error" boundary from
    /// §7 of the design: a failure here indicates a programming bug, since
    /// upstream entities have already passed domain validation.
    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(Error::profile("message must contain at least one segment"));
        }

        let first = &self.segments[0];
        if first.id != "MSH" {
            return Err(Error::profile("first segment must be MSH"));
        }

        for segment in &self.segments {
            segment.validate_id()?;
        }

        self.delimiters.validate()?;

        if self.get_version() != Some(HL7_VERSION) {
            return Err(Error::profile(format!(
                "MSH-12 must equal {HL7_VERSION}, got: {:?}",
                self.get_version()
            )));
        }

        Ok(())
    }

    /// Encode the message. Segments are separated by carriage return (`\r`)
    /// only, never line feed.
    pub fn encode(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.encode(&self.delimiters))
            .collect::<Vec<_>>()
            .join("\r")
    }

    /// Get the number of segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

/// Message type identifiers for the SS-MIX2 storage categories this
/// engine emits.
pub mod message_types {
    /// ADT - Admit/Discharge/Transfer (patient master update)
    pub const ADT: &str = "ADT";

    /// OMP - Pharmacy/Treatment Order
    pub const OMP: &str = "OMP";

    /// OML - Laboratory Order
    pub const OML: &str = "OML";

    /// ORU - Observation Result (laboratory result)
    pub const ORU: &str = "ORU";
}

/// Trigger events for the four message types this engine emits.
pub mod trigger_events {
    /// A08 - Update patient information
    pub const A08: &str = "A08";

    /// O09 - Pharmacy/treatment order message
    pub const O09: &str = "O09";

    /// O33 - Laboratory order message
    pub const O33: &str = "O33";

    /// R01 - Unsolicited transmission of an observation message
    pub const R01: &str = "R01";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn create_test_msh() -> Segment {
        let mut msh = Segment::new("MSH");
        msh.add_field(Field::new()); // MSH-1 placeholder, rendered from delimiters
        msh.add_field(Field::from_value("^~\\&")); // MSH-2 placeholder, rendered from delimiters
        msh.add_field(Field::from_value("SendingApp")); // MSH-3
        msh.add_field(Field::from_value("SendingFac")); // MSH-4
        msh.add_field(Field::from_value("ReceivingApp")); // MSH-5
        msh.add_field(Field::from_value("ReceivingFac")); // MSH-6
        msh.add_field(Field::from_value("20240101120000")); // MSH-7
        msh.add_field(Field::from_value("")); // MSH-8
        msh.add_field(Field::from_value("ADT^A08")); // MSH-9
        msh.add_field(Field::from_value("CTRL1")); // MSH-10
        msh.add_field(Field::from_value("P")); // MSH-11
        msh.add_field(Field::from_value(HL7_VERSION)); // MSH-12
        msh
    }

    #[test]
    fn test_new_message() {
        let msg = Message::new();
        assert_eq!(msg.segments.len(), 0);
        assert_eq!(msg.delimiters, Delimiters::default());
    }

    #[test]
    fn test_get_msh_and_accessors() {
        let mut msg = Message::new();
        msg.add_segment(create_test_msh());

        let msh = msg.get_msh();
        assert!(msh.is_some());
        assert_eq!(msg.get_sending_application(), Some("SendingApp"));
        assert_eq!(msg.get_control_id(), Some("CTRL1"));
        assert_eq!(msg.get_version(), Some(HL7_VERSION));
        assert_eq!(
            msg.get_message_type(),
            Some(("ADT".to_string(), "A08".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_message() {
        assert!(Message::new().validate().is_err());
    }

    #[test]
    fn test_validate_msh_first() {
        let mut msg = Message::new();
        msg.add_segment(Segment::new("PID"));
        assert!(msg.validate().is_err());
    }

    #[test]
    fn test_validate_valid_message() {
        let mut msg = Message::new();
        msg.add_segment(create_test_msh());
        msg.add_segment(Segment::new("PID"));
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn test_encode_message_uses_cr_only() {
        let mut msg = Message::new();
        msg.add_segment(create_test_msh());
        msg.add_segment(Segment::new("PID"));

        let encoded = msg.encode();
        assert!(encoded.starts_with("MSH|^~\\&|"));
        assert!(encoded.contains("\rPID"));
        assert!(!encoded.contains('\n'));
    }

    #[test]
    fn test_get_segments_by_id() {
        let mut msg = Message::new();
        msg.add_segment(create_test_msh());
        msg.add_segment(Segment::new("PID"));
        msg.add_segment(Segment::new("PID"));

        assert_eq!(msg.get_segments_by_id("PID").len(), 2);
    }
}

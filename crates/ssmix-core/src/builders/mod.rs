//! Message builders for creating HL7 messages programmatically
//!
//! This module provides builder patterns for creating HL7 messages of various types.
//! Builders help ensure messages are created with required fields and proper structure.
//! Every builder takes its timestamps and control IDs as explicit arguments rather
//! than reading the wall clock, so that a given (seed, entity) pair always produces
//! byte-identical output.

pub mod adt;
pub mod fields;
pub mod laboratory;
pub mod oru;
pub mod pharmacy;

use crate::{
    delimiters::Delimiters, error::Result, field::Field, message::Message, segment::Segment,
    HL7_VERSION,
};

/// Base message builder with common functionality
pub struct MessageBuilder {
    message: Message,
    message_type: String,
    trigger_event: String,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new(message_type: &str, trigger_event: &str) -> Self {
        Self {
            message: Message::new(),
            message_type: message_type.to_string(),
            trigger_event: trigger_event.to_string(),
        }
    }

    /// Create MSH segment with basic fields
    ///
    /// `message_datetime` is the MSH-7 timestamp; callers pass the synthesized
    /// event time, never the wall clock.
    pub fn create_msh(
        &self,
        sending_app: &str,
        sending_facility: &str,
        receiving_app: &str,
        receiving_facility: &str,
        message_datetime: &str,
        control_id: &str,
        processing_id: &str,
    ) -> Result<Segment> {
        let mut msh = Segment::new("MSH");
        let delims = Delimiters::default();

        // MSH-1: Field separator (rendered specially by Segment::encode; this
        // slot exists only so generic 1-based indexing lines up from MSH-3 on)
        msh.add_field(Field::from_value(delims.field_separator.to_string()));

        // MSH-2: Encoding characters (also rendered specially by Segment::encode)
        msh.add_field(Field::from_value(format!(
            "{}{}{}{}",
            delims.component_separator,
            delims.repetition_separator,
            delims.escape_character,
            delims.subcomponent_separator
        )));

        msh.add_field(Field::from_value(sending_app)); // MSH-3
        msh.add_field(Field::from_value(sending_facility)); // MSH-4
        msh.add_field(Field::from_value(receiving_app)); // MSH-5
        msh.add_field(Field::from_value(receiving_facility)); // MSH-6
        msh.add_field(Field::from_value(message_datetime)); // MSH-7
        msh.add_field(Field::from_value("")); // MSH-8: Security (unused)

        let msg_type = format!("{}^{}", self.message_type, self.trigger_event);
        msh.add_field(Field::from_value(&msg_type)); // MSH-9

        msh.add_field(Field::from_value(control_id)); // MSH-10
        msh.add_field(Field::from_value(processing_id)); // MSH-11
        msh.add_field(Field::from_value(HL7_VERSION)); // MSH-12

        Ok(msh)
    }

    /// Create EVN segment. `recorded_datetime` is required; ADT^A08 always
    /// carries the synthesized admission event time here, never the wall clock.
    pub fn create_evn(&self, event_type_code: &str, recorded_datetime: &str) -> Result<Segment> {
        let mut evn = Segment::new("EVN");
        evn.add_field(Field::from_value(event_type_code)); // EVN-1
        evn.add_field(Field::from_value(recorded_datetime)); // EVN-2
        Ok(evn)
    }

    /// Build the final message
    pub fn build(self) -> Message {
        self.message
    }
}

/// Build a deterministic message control ID from the entity identifier and a
/// caller-supplied sequence number. Two calls with the same arguments always
/// produce the same ID; nothing here reads the wall clock or a random source.
pub fn generate_control_id(entity_id: &str, sequence: u64) -> String {
    format!("MSG-{entity_id}-{sequence}")
}

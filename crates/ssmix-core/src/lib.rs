//! Core data structures and types for HL7 v2.5 message construction.
//!
//! This crate provides the foundational types used throughout the SS-MIX2
//! generator:
//! - Message structure hierarchy (Message, Segment, Field, Component, Subcomponent)
//! - The three-state field value model (absent / value / literal quoted-null)
//! - Message builders for assembling HL7 v2.5 messages programmatically
//! - Encoding characters, delimiters and escape sequences
//! - Error types

pub mod builders;
pub mod delimiters;
pub mod encoding;
pub mod error;
pub mod field;
pub mod message;
pub mod segment;
pub mod types;

pub use delimiters::Delimiters;
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use field::{Component, Field, FieldValue, Repetition, SubComponent};
pub use message::Message;
pub use segment::Segment;

/// SS-MIX2 fixes HL7 on version 2.5; there is no version negotiation anywhere
/// in this system, so the version is a constant rather than an enumerated type.
pub const HL7_VERSION: &str = "2.5";

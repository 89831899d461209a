//! Error types for HL7 v2.5 message construction.

use thiserror::Error;

/// Result type alias for ssmix-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling or encoding HL7 v2.5 messages.
///
/// These map onto the "profile error" and "encoding error" kinds: failures
/// here indicate either a message-level precondition was violated (a
/// programming bug, since upstream entities are already validated) or a
/// value could not be represented in the declared character set.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid delimiter configuration: {0}")]
    InvalidDelimiters(String),

    #[error("invalid segment: {0}")]
    InvalidSegment(String),

    #[error("invalid field access: {0}")]
    InvalidFieldAccess(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("message profile violation: {0}")]
    Profile(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),
}

impl Error {
    /// Build a profile-violation error naming the message type and the
    /// unmet precondition.
    pub fn profile<S: Into<String>>(msg: S) -> Self {
        Error::Profile(msg.into())
    }
}

//! Wire delimiters for the HL7 v2.5 messages this generator emits.
//!
//! Every message produced by this generator carries the same four MSH-2
//! encoding characters and the same MSH-1 field separator — SS-MIX2 does
//! not define a profile for custom delimiters, so [`Delimiters::default`]
//! is what [`crate::message::Message::new`] reaches for and what every
//! builder in [`crate::builders`] assumes when it composes a segment.
//! `from_encoding_characters` exists for the symmetric case: decoding a
//! message this generator did not itself produce, where MSH-1/MSH-2 have
//! to be read off the wire before anything else can be parsed.
//!
//! ```
//! use ssmix_core::delimiters::Delimiters;
//!
//! let delims = Delimiters::default();
//! assert_eq!(delims.encoding_characters(), "^~\\&");
//! assert_eq!(delims.field_separator, '|');
//! ```

use crate::error::{Error, Result};

/// The field separator this generator places in MSH-1. HL7 v2.5 allows any
/// character here as long as it is consistent across the message; SS-MIX2
/// output always uses the pipe.
pub const DEFAULT_FIELD_SEPARATOR: char = '|';

/// The four MSH-2 encoding characters this generator writes, in their
/// fixed wire order (component, repetition, escape, subcomponent).
pub const DEFAULT_COMPONENT_SEPARATOR: char = '^';
pub const DEFAULT_REPETITION_SEPARATOR: char = '~';
pub const DEFAULT_ESCAPE_CHARACTER: char = '\\';
pub const DEFAULT_SUBCOMPONENT_SEPARATOR: char = '&';

/// The set of characters a message's segments, fields and components are
/// split on, plus the escape character used to carry a delimiter literal
/// inside a value. One `Delimiters` value is attached to every
/// [`crate::message::Message`] and threaded through every encode/decode
/// call so a field never has to guess which characters are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field_separator: char,
    pub component_separator: char,
    pub repetition_separator: char,
    pub escape_character: char,
    pub subcomponent_separator: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field_separator: DEFAULT_FIELD_SEPARATOR,
            component_separator: DEFAULT_COMPONENT_SEPARATOR,
            repetition_separator: DEFAULT_REPETITION_SEPARATOR,
            escape_character: DEFAULT_ESCAPE_CHARACTER,
            subcomponent_separator: DEFAULT_SUBCOMPONENT_SEPARATOR,
        }
    }
}

impl Delimiters {
    /// Equivalent to [`Delimiters::default`] — every message this
    /// generator builds starts here.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads delimiters off an inbound MSH segment: the field separator is
    /// whatever single character follows `MSH`, and `encoding_chars` is
    /// MSH-2's four-character literal (component, repetition, escape,
    /// subcomponent, in that order). Rejects a non-4-character MSH-2 or one
    /// with a repeated character, since a delimiter that collides with
    /// another can't be unambiguously split back out.
    pub fn from_encoding_characters(field_sep: char, encoding_chars: &str) -> Result<Self> {
        let chars: Vec<char> = encoding_chars.chars().collect();
        if chars.len() != 4 {
            return Err(Error::InvalidDelimiters(format!(
                "MSH-2 must carry exactly 4 encoding characters, got {}",
                chars.len()
            )));
        }

        let delims = Self {
            field_separator: field_sep,
            component_separator: chars[0],
            repetition_separator: chars[1],
            escape_character: chars[2],
            subcomponent_separator: chars[3],
        };
        delims.validate()?;
        Ok(delims)
    }

    /// Renders MSH-2: the four encoding characters in wire order, with no
    /// separator between them.
    pub fn encoding_characters(&self) -> String {
        format!(
            "{}{}{}{}",
            self.component_separator, self.repetition_separator, self.escape_character, self.subcomponent_separator
        )
    }

    /// Confirms none of the five delimiter characters collide. A generator
    /// building messages from [`Delimiters::default`] never needs this —
    /// it exists for the inbound path, where `from_encoding_characters`
    /// calls it on whatever MSH-2 the source message happened to carry.
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.field_separator,
            self.component_separator,
            self.repetition_separator,
            self.escape_character,
            self.subcomponent_separator,
        ];

        for (i, &left) in all.iter().enumerate() {
            for &right in &all[i + 1..] {
                if left == right {
                    return Err(Error::InvalidDelimiters(format!("duplicate delimiter character: '{left}'")));
                }
            }
        }
        Ok(())
    }

    /// True for any character that splits structure apart (field,
    /// component, repetition or subcomponent) — not the escape character,
    /// which introduces an escape sequence rather than ending a unit.
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.field_separator || c == self.component_separator || c == self.repetition_separator || c == self.subcomponent_separator
    }

    pub fn is_escape(&self, c: char) -> bool {
        c == self.escape_character
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_ss_mix2_wire_delimiters() {
        let delims = Delimiters::default();
        assert_eq!(delims.field_separator, '|');
        assert_eq!(delims.component_separator, '^');
        assert_eq!(delims.repetition_separator, '~');
        assert_eq!(delims.escape_character, '\\');
        assert_eq!(delims.subcomponent_separator, '&');
    }

    #[test]
    fn round_trips_through_encoding_characters() {
        let delims = Delimiters::from_encoding_characters('|', "^~\\&").unwrap();
        assert_eq!(delims, Delimiters::default());
        assert_eq!(delims.encoding_characters(), "^~\\&");
    }

    #[test]
    fn rejects_encoding_characters_of_the_wrong_length() {
        assert!(Delimiters::from_encoding_characters('|', "^~\\").is_err());
        assert!(Delimiters::from_encoding_characters('|', "^~\\&&").is_err());
    }

    #[test]
    fn rejects_a_repeated_delimiter() {
        assert!(Delimiters::from_encoding_characters('|', "^^^^").is_err());
    }

    #[test]
    fn is_delimiter_excludes_the_escape_character() {
        let delims = Delimiters::default();
        for c in ['|', '^', '~', '&'] {
            assert!(delims.is_delimiter(c));
        }
        assert!(!delims.is_delimiter('\\'));
        assert!(!delims.is_delimiter('A'));
    }

    #[test]
    fn is_escape_only_matches_the_escape_character() {
        let delims = Delimiters::default();
        assert!(delims.is_escape('\\'));
        assert!(!delims.is_escape('|'));
        assert!(!delims.is_escape('A'));
    }
}

//! Escaping free text so it survives a trip through the pipe-and-hat wire
//! format.
//!
//! A patient's name, an allergy note, a drug name — any free-text value
//! this generator synthesizes could coincidentally contain one of the five
//! structural characters from [`crate::delimiters::Delimiters`], or a raw
//! CR/LF that would otherwise look like a segment terminator. [`Encoding`]
//! is what every `Field`/`Component` encode path in [`crate::field`] calls
//! before writing a value onto the wire, and what the inbound-decoding path
//! calls to undo it. The escape forms themselves are fixed by HL7 v2.5,
//! not by anything this generator chooses:
//!
//! | sequence  | meaning                                   |
//! |-----------|--------------------------------------------|
//! | `\F\`     | field separator                             |
//! | `\S\`     | component separator                         |
//! | `\T\`     | subcomponent separator                      |
//! | `\R\`     | repetition separator                        |
//! | `\E\`     | escape character                            |
//! | `\Xnn..\` | hexadecimal character (e.g. `\X0D\` for CR) |
//! | `\Znn..\` | locally defined sequence, passed through    |
//! | `\.br\`   | line break                                  |
//! | `\H\`/`\N\` | highlighting on/off, dropped on decode    |

use crate::delimiters::Delimiters;
use crate::error::{Error, Result};

/// A stateless pair of encode/decode functions, grouped as an empty struct
/// so callers read `Encoding::encode(..)` the same way they read
/// `Delimiters::default()` — no instance to construct or thread through.
pub struct Encoding;

impl Encoding {
    /// Replaces every delimiter character, CR and LF in `input` with its
    /// escape sequence, per `delimiters`.
    pub fn encode(input: &str, delimiters: &Delimiters) -> String {
        let esc = delimiters.escape_character;
        let mut out = String::with_capacity(input.len());

        for ch in input.chars() {
            let code = match ch {
                c if c == esc => Some('E'),
                c if c == delimiters.field_separator => Some('F'),
                c if c == delimiters.component_separator => Some('S'),
                c if c == delimiters.subcomponent_separator => Some('T'),
                c if c == delimiters.repetition_separator => Some('R'),
                _ => None,
            };

            match (code, ch) {
                (Some(code), _) => {
                    out.push(esc);
                    out.push(code);
                    out.push(esc);
                }
                (None, '\r') => out.push_str(&format!("{esc}X0D{esc}")),
                (None, '\n') => out.push_str(&format!("{esc}X0A{esc}")),
                (None, other) => out.push(other),
            }
        }

        out
    }

    /// Reverses [`Encoding::encode`]. Unrecognized escape sequences and
    /// malformed hex payloads are rejected rather than silently dropped —
    /// an inbound message that can't be unescaped faithfully shouldn't be
    /// treated as parsed successfully.
    pub fn decode(input: &str, delimiters: &Delimiters) -> Result<String> {
        let esc = delimiters.escape_character;
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != esc {
                out.push(ch);
                continue;
            }

            let mut sequence = String::new();
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == esc {
                    break;
                }
                sequence.push(next);
            }
            decode_sequence(&sequence, delimiters, &mut out)?;
        }

        Ok(out)
    }
}

fn decode_sequence(sequence: &str, delimiters: &Delimiters, out: &mut String) -> Result<()> {
    match sequence {
        "F" => out.push(delimiters.field_separator),
        "S" => out.push(delimiters.component_separator),
        "T" => out.push(delimiters.subcomponent_separator),
        "R" => out.push(delimiters.repetition_separator),
        "E" => out.push(delimiters.escape_character),
        ".br" => out.push('\n'),
        "H" | "N" => {}
        seq if seq.starts_with('X') => {
            let code = u32::from_str_radix(&seq[1..], 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| Error::Decoding(format!("invalid hexadecimal escape sequence: \\{seq}\\")))?;
            out.push(code);
        }
        seq if seq.starts_with('Z') => {
            out.push(delimiters.escape_character);
            out.push_str(seq);
            out.push(delimiters.escape_character);
        }
        other => return Err(Error::Decoding(format!("unknown escape sequence: \\{other}\\"))),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_structural_character() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::encode("|", &delims), "\\F\\");
        assert_eq!(Encoding::encode("^", &delims), "\\S\\");
        assert_eq!(Encoding::encode("&", &delims), "\\T\\");
        assert_eq!(Encoding::encode("~", &delims), "\\R\\");
        assert_eq!(Encoding::encode("\\", &delims), "\\E\\");
    }

    #[test]
    fn encodes_structural_characters_inline_with_plain_text() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::encode("Test|Value^Component", &delims), "Test\\F\\Value\\S\\Component");
    }

    #[test]
    fn encodes_carriage_return_and_line_feed_as_hex_escapes() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::encode("\r\n", &delims), "\\X0D\\\\X0A\\");
    }

    #[test]
    fn decodes_each_structural_escape() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::decode("\\F\\", &delims).unwrap(), "|");
        assert_eq!(Encoding::decode("\\S\\", &delims).unwrap(), "^");
        assert_eq!(Encoding::decode("\\T\\", &delims).unwrap(), "&");
        assert_eq!(Encoding::decode("\\R\\", &delims).unwrap(), "~");
        assert_eq!(Encoding::decode("\\E\\", &delims).unwrap(), "\\");
    }

    #[test]
    fn decodes_hex_escapes() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::decode("\\X0D\\", &delims).unwrap(), "\r");
        assert_eq!(Encoding::decode("\\X0A\\", &delims).unwrap(), "\n");
        assert_eq!(Encoding::decode("\\X20\\", &delims).unwrap(), " ");
    }

    #[test]
    fn decodes_line_break_escape() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::decode("\\.br\\", &delims).unwrap(), "\n");
    }

    #[test]
    fn drops_highlighting_escapes_on_decode() {
        let delims = Delimiters::default();
        assert_eq!(Encoding::decode("\\H\\bold\\N\\", &delims).unwrap(), "bold");
    }

    #[test]
    fn round_trips_every_structural_character_at_once() {
        let delims = Delimiters::default();
        let original = "Test|Value^Component&Sub~Rep\\Escape";
        let encoded = Encoding::encode(original, &delims);
        assert_eq!(Encoding::decode(&encoded, &delims).unwrap(), original);
    }

    #[test]
    fn rejects_an_unrecognized_escape_sequence() {
        let delims = Delimiters::default();
        assert!(Encoding::decode("\\INVALID\\", &delims).is_err());
    }

    #[test]
    fn rejects_a_malformed_hex_escape() {
        let delims = Delimiters::default();
        assert!(Encoding::decode("\\XZZ\\", &delims).is_err());
    }
}

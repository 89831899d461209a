//! Domain invariant errors.

use thiserror::Error;

/// Result type alias for ssmix-domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// A violated entity invariant, naming the entity, the attribute, the
/// offending value, and the rule that rejected it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{entity}.{attribute} = {value:?}: {rule}")]
pub struct DomainError {
    pub entity: &'static str,
    pub attribute: &'static str,
    pub value: String,
    pub rule: &'static str,
}

impl DomainError {
    pub fn new(entity: &'static str, attribute: &'static str, value: impl Into<String>, rule: &'static str) -> Self {
        Self {
            entity,
            attribute,
            value: value.into(),
            rule,
        }
    }
}

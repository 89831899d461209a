//! HL7 field, component, and subcomponent structures.
//!
//! HL7 v2.5 distinguishes three states for an optional-but-profile-required
//! field: absent (nothing supplied), an ordinary value, and the literal
//! two-character string `""` used when a profile requires the field but its
//! semantic value is undefined (e.g. RXE-3 minimum dose for an ointment).
//! The third state is a first-class variant here rather than a sentinel
//! string, so callers cannot confuse it with a legitimate two-character
//! value a user might type.

use crate::encoding::Encoding;
use crate::delimiters::Delimiters;
use crate::error::Result;

/// The three representable states of an HL7 field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Nothing supplied; encodes as an empty string between delimiters.
    Absent,
    /// An ordinary, possibly-empty-by-choice value.
    Value(String),
    /// The documented literal `""` fallback for a profile-required field
    /// whose value is semantically undefined.
    QuotedNull,
}

/// A subcomponent within a component
///
/// This is the smallest unit in HL7 message hierarchy.
/// Example: In "Smith&John", "Smith" and "John" are subcomponents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubComponent {
    pub value: String,
}

impl SubComponent {
    /// Create a new subcomponent
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Check if subcomponent is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the raw value
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Encode the subcomponent value
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        Encoding::encode(&self.value, delimiters)
    }

    /// Decode from string
    pub fn decode(value: &str, delimiters: &Delimiters) -> Result<Self> {
        Ok(Self {
            value: Encoding::decode(value, delimiters)?,
        })
    }
}

impl From<String> for SubComponent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SubComponent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A component within a field
///
/// Components can contain subcomponents separated by the subcomponent separator (&).
/// Example: In "Smith&John^MD", "Smith&John" is a component with two subcomponents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub subcomponents: Vec<SubComponent>,
}

impl Component {
    /// Create a new component
    pub fn new() -> Self {
        Self {
            subcomponents: Vec::new(),
        }
    }

    /// Create a component from a single value
    pub fn from_value<S: Into<String>>(value: S) -> Self {
        Self {
            subcomponents: vec![SubComponent::new(value)],
        }
    }

    /// Add a subcomponent
    pub fn add_subcomponent(&mut self, subcomponent: SubComponent) {
        self.subcomponents.push(subcomponent);
    }

    /// Get a subcomponent by index (0-based)
    pub fn get_subcomponent(&self, index: usize) -> Option<&SubComponent> {
        self.subcomponents.get(index)
    }

    /// Get a mutable subcomponent by index (0-based)
    pub fn get_subcomponent_mut(&mut self, index: usize) -> Option<&mut SubComponent> {
        self.subcomponents.get_mut(index)
    }

    /// Check if component is empty
    pub fn is_empty(&self) -> bool {
        self.subcomponents.is_empty() || self.subcomponents.iter().all(|s| s.is_empty())
    }

    /// Get the first subcomponent value (most common case)
    pub fn value(&self) -> Option<&str> {
        self.subcomponents.first().map(|s| s.as_str())
    }

    /// Encode the component
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        self.subcomponents
            .iter()
            .map(|sc| sc.encode(delimiters))
            .collect::<Vec<_>>()
            .join(&delimiters.subcomponent_separator.to_string())
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

/// A repetition of a field
///
/// Fields can repeat, with each repetition containing components.
/// Example: In "Value1~Value2~Value3", there are 3 repetitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    pub components: Vec<Component>,
}

impl Repetition {
    /// Create a new repetition
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Create from a single value
    pub fn from_value<S: Into<String>>(value: S) -> Self {
        Self {
            components: vec![Component::from_value(value)],
        }
    }

    /// Add a component
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Get a component by index (0-based)
    pub fn get_component(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    /// Get a mutable component by index (0-based)
    pub fn get_component_mut(&mut self, index: usize) -> Option<&mut Component> {
        self.components.get_mut(index)
    }

    /// Check if repetition is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() || self.components.iter().all(|c| c.is_empty())
    }

    /// Get the first component's value (most common case)
    pub fn value(&self) -> Option<&str> {
        self.components.first().and_then(|c| c.value())
    }

    /// Encode the repetition
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        self.components
            .iter()
            .map(|c| c.encode(delimiters))
            .collect::<Vec<_>>()
            .join(&delimiters.component_separator.to_string())
    }
}

impl Default for Repetition {
    fn default() -> Self {
        Self::new()
    }
}

/// A field within a segment
///
/// Fields can contain multiple repetitions, each with components and subcomponents.
/// The hierarchy is: Field -> Repetitions -> Components -> Subcomponents.
/// A field additionally carries a quoted-null flag independent of that
/// hierarchy, so `Field::quoted_null()` can be constructed and encoded
/// without any repetition data at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub repetitions: Vec<Repetition>,
    quoted_null: bool,
}

impl Field {
    /// Create a new empty (absent) field
    pub fn new() -> Self {
        Self {
            repetitions: Vec::new(),
            quoted_null: false,
        }
    }

    /// Create from a single value
    pub fn from_value<S: Into<String>>(value: S) -> Self {
        Self {
            repetitions: vec![Repetition::from_value(value)],
            quoted_null: false,
        }
    }

    /// The documented literal `""` fallback value: encodes verbatim as two
    /// quote characters, never escaped and never treated as empty.
    pub fn quoted_null() -> Self {
        Self {
            repetitions: Vec::new(),
            quoted_null: true,
        }
    }

    /// Build a field from an explicit tri-state value.
    pub fn from_field_value(value: FieldValue) -> Self {
        match value {
            FieldValue::Absent => Self::new(),
            FieldValue::Value(s) => Self::from_value(s),
            FieldValue::QuotedNull => Self::quoted_null(),
        }
    }

    /// Add a repetition
    pub fn add_repetition(&mut self, repetition: Repetition) {
        self.repetitions.push(repetition);
    }

    /// Get a repetition by index (0-based)
    pub fn get_repetition(&self, index: usize) -> Option<&Repetition> {
        self.repetitions.get(index)
    }

    /// Get a mutable repetition by index (0-based)
    pub fn get_repetition_mut(&mut self, index: usize) -> Option<&mut Repetition> {
        self.repetitions.get_mut(index)
    }

    pub fn is_quoted_null(&self) -> bool {
        self.quoted_null
    }

    /// Check if field is empty. The quoted-null sentinel is never empty.
    pub fn is_empty(&self) -> bool {
        !self.quoted_null && (self.repetitions.is_empty() || self.repetitions.iter().all(|r| r.is_empty()))
    }

    /// Get the first repetition's value (most common case)
    pub fn value(&self) -> Option<&str> {
        if self.quoted_null {
            Some("\"\"")
        } else {
            self.repetitions.first().and_then(|r| r.value())
        }
    }

    /// Encode the field. The quoted-null sentinel bypasses escaping
    /// entirely: it is emitted as exactly the two characters `""`.
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        if self.quoted_null {
            return "\"\"".to_string();
        }
        self.repetitions
            .iter()
            .map(|r| r.encode(delimiters))
            .collect::<Vec<_>>()
            .join(&delimiters.repetition_separator.to_string())
    }

    /// Get component at path (e.g., \[0\]\[2\] for first repetition, third component)
    pub fn get_component(&self, rep_index: usize, comp_index: usize) -> Option<&Component> {
        self.get_repetition(rep_index)
            .and_then(|r| r.get_component(comp_index))
    }

    /// Get subcomponent at path
    pub fn get_subcomponent(
        &self,
        rep_index: usize,
        comp_index: usize,
        sub_index: usize,
    ) -> Option<&SubComponent> {
        self.get_component(rep_index, comp_index)
            .and_then(|c| c.get_subcomponent(sub_index))
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcomponent() {
        let sc = SubComponent::new("Test");
        assert_eq!(sc.as_str(), "Test");
        assert!(!sc.is_empty());

        let empty = SubComponent::new("");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_component() {
        let mut comp = Component::new();
        comp.add_subcomponent(SubComponent::new("First"));
        comp.add_subcomponent(SubComponent::new("Second"));

        assert_eq!(comp.subcomponents.len(), 2);
        assert_eq!(comp.value(), Some("First"));
    }

    #[test]
    fn test_repetition() {
        let mut rep = Repetition::new();
        rep.add_component(Component::from_value("Component1"));
        rep.add_component(Component::from_value("Component2"));

        assert_eq!(rep.components.len(), 2);
        assert_eq!(rep.value(), Some("Component1"));
    }

    #[test]
    fn test_field() {
        let mut field = Field::new();
        field.add_repetition(Repetition::from_value("Rep1"));
        field.add_repetition(Repetition::from_value("Rep2"));

        assert_eq!(field.repetitions.len(), 2);
        assert_eq!(field.value(), Some("Rep1"));
    }

    #[test]
    fn test_field_hierarchy() {
        let mut field = Field::new();
        let mut rep = Repetition::new();
        let mut comp = Component::new();
        comp.add_subcomponent(SubComponent::new("SubValue"));
        rep.add_component(comp);
        field.add_repetition(rep);

        let subcomp = field.get_subcomponent(0, 0, 0);
        assert_eq!(subcomp.map(|s| s.as_str()), Some("SubValue"));
    }

    #[test]
    fn test_encoding() {
        let delims = Delimiters::default();

        let mut field = Field::new();
        let mut rep = Repetition::new();
        rep.add_component(Component::from_value("Test|Value"));
        field.add_repetition(rep);

        let encoded = field.encode(&delims);
        assert!(encoded.contains("\\F\\"));
    }

    #[test]
    fn test_absent_field_encodes_empty() {
        let delims = Delimiters::default();
        let field = Field::new();
        assert!(field.is_empty());
        assert!(!field.is_quoted_null());
        assert_eq!(field.encode(&delims), "");
    }

    #[test]
    fn test_quoted_null_encodes_literal_two_chars() {
        let delims = Delimiters::default();
        let field = Field::quoted_null();
        assert!(field.is_quoted_null());
        assert!(!field.is_empty());
        assert_eq!(field.encode(&delims), "\"\"");
    }

    #[test]
    fn test_from_field_value_round_trips_each_state() {
        let delims = Delimiters::default();
        assert_eq!(Field::from_field_value(FieldValue::Absent).encode(&delims), "");
        assert_eq!(
            Field::from_field_value(FieldValue::Value("ABC".into())).encode(&delims),
            "ABC"
        );
        assert_eq!(Field::from_field_value(FieldValue::QuotedNull).encode(&delims), "\"\"");
    }
}

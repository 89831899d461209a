//! Self-validating clinical entities for SS-MIX2 generation.
//!
//! Every entity here validates its invariants on construction and reports
//! failures as a [`DomainError`] naming the entity, the attribute, the
//! offending value, and the rule that was broken. Optional attributes
//! uniformly accept the empty string; only required attributes reject it.

pub mod admission;
pub mod error;
pub mod hospital;
pub mod order;
pub mod patient;
pub mod specimen;

pub use admission::Admission;
pub use error::{DomainError, Result};
pub use hospital::Hospital;
pub use lab_test::{LabTest, Observation};
pub use order::{MinimumDose, Order};
pub use patient::{Patient, SynthesizedAddress, SynthesizedName};
pub use specimen::Specimen;

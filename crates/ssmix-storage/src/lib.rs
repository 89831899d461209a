//! SS-MIX2 directory layout and the parallel, atomic message writer.

pub mod error;
pub mod layout;
pub mod precedence;
pub mod worker;
pub mod writer;

pub use error::{Result, StorageError};
pub use worker::{run, PatientSlice, RenderedMessage, RunOutcome, SliceFailure};

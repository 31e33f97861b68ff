//! Error-outcome inference.

pub mod factory;
pub mod inference;
pub mod types;

pub use factory::{ErrorFactoryTable, FactoryMember};
pub use inference::infer_outcomes;
pub use types::{ErrorOutcome, KnownKind};

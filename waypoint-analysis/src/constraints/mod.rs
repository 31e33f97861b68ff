//! Constraint/type cross-checking between route patterns and bindings.

pub mod checker;
pub mod table;

pub use checker::check_constraints;

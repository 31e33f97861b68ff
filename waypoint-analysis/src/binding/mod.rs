//! Parameter binding-source resolution.

pub mod resolver;
pub mod types;

pub use resolver::resolve_bindings;
pub use types::{BindingSource, BodyBucket, ParameterBinding};

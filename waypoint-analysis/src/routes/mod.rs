//! Route pattern parsing and canonicalization.

pub mod canonical;
pub mod parser;
pub mod types;

pub use canonical::canonical_route_key;
pub use parser::parse_route_pattern;
pub use types::{RouteConstraint, RouteParameter, RoutePattern};

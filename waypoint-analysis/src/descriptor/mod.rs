//! Endpoint descriptor assembly.

pub mod builder;
pub mod types;

pub use builder::build_descriptor;
pub use types::{EndpointDescriptor, HandlerIdentity, PayloadKind, ReturnShape};

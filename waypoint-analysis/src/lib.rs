//! Waypoint analysis engine.
//!
//! Turns declaratively annotated handler functions into immutable endpoint
//! descriptors: route pattern parsing, parameter binding resolution,
//! constraint checking, bounded error-outcome inference, and cross-handler
//! duplicate-route detection, all surfaced through stable diagnostic codes.
//!
//! The host front end materializes [`model::HandlerModel`] values and a
//! [`model::SymbolResolver`]; [`pipeline::AnalysisPipeline::run`] does the
//! rest. Identical input always produces byte-identical output.

pub mod binding;
pub mod constraints;
pub mod descriptor;
pub mod duplicates;
pub mod model;
pub mod outcomes;
pub mod pipeline;
pub mod routes;

pub use binding::{BindingSource, ParameterBinding};
pub use descriptor::{EndpointDescriptor, PayloadKind, ReturnShape};
pub use model::{HandlerModel, HandlerParam, HttpVerb, SymbolResolver, TypeRef};
pub use outcomes::{ErrorOutcome, KnownKind};
pub use pipeline::{AnalysisPipeline, AnalysisRun, AnalysisStats};
pub use routes::{RoutePattern, RouteParameter};

//! The materialized input surface produced by the host compiler.
//!
//! Everything the pipeline consumes is already resolved: handler models with
//! attribute references and typed parameters, body expression trees, and a
//! `SymbolResolver` for reaching other declarations. No parsing happens here.

pub mod attributes;
pub mod body;
pub mod resolution;
pub mod types;

pub use attributes::{AttributeRef, MarkerKind, RecognizedAttribute};
pub use body::{Body, CallExpr, Expr};
pub use resolution::{
    CompositeMember, CompositeShape, ConstValue, ResolutionContext, SymbolInfo, SymbolKind,
    SymbolResolver, WellKnownTypes,
};
pub use types::{
    type_names_match, HandlerModel, HandlerParam, HttpVerb, ParseStrategy, SymbolId, TypeRef,
};

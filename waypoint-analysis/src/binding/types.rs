//! Parameter binding types.

use serde::{Deserialize, Serialize};

use crate::model::{ParseStrategy, TypeRef};

/// The origin a handler parameter's value is obtained from at request time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingSource {
    Route,
    Query,
    Header,
    Body,
    Form,
    FormFile,
    FormFileCollection,
    FormCollection,
    Stream,
    RawReader,
    Service,
    KeyedService(String),
    /// A recognized runtime context value (request context handle).
    SpecialContext,
    Cancellation,
    /// A wrapper synthesized from several sources; see `nested`.
    Composite,
}

impl BindingSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
            Self::Form => "form",
            Self::FormFile => "form-file",
            Self::FormFileCollection => "form-file-collection",
            Self::FormCollection => "form-collection",
            Self::Stream => "stream",
            Self::RawReader => "raw-reader",
            Self::Service => "service",
            Self::KeyedService(_) => "keyed-service",
            Self::SpecialContext => "context",
            Self::Cancellation => "cancellation",
            Self::Composite => "composite",
        }
    }

    /// The request-body bucket this source consumes, if any. At most one
    /// distinct bucket may be in use per handler.
    pub fn body_bucket(&self) -> Option<BodyBucket> {
        match self {
            Self::Body => Some(BodyBucket::Body),
            Self::Form | Self::FormFile | Self::FormFileCollection | Self::FormCollection => {
                Some(BodyBucket::Form)
            }
            Self::Stream | Self::RawReader => Some(BodyBucket::Stream),
            _ => None,
        }
    }
}

impl std::fmt::Display for BindingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three ways a handler can consume the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyBucket {
    Body,
    Form,
    Stream,
}

impl BodyBucket {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Form => "form",
            Self::Stream => "stream",
        }
    }
}

/// One resolved binding, owned by its endpoint descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterBinding {
    /// The parameter (or composite member) name in source.
    pub name: String,
    pub ty: TypeRef,
    pub source: BindingSource,
    /// The external key the value is looked up by: route parameter name,
    /// query key, or header name. Defaults to the parameter name.
    pub external_name: String,
    pub parse_strategy: Option<ParseStrategy>,
    /// Member bindings of a composite parameter (one level deep).
    pub nested: Vec<ParameterBinding>,
}

impl ParameterBinding {
    pub fn new(name: impl Into<String>, ty: TypeRef, source: BindingSource) -> Self {
        let name = name.into();
        let parse_strategy = ty.parse_strategy;
        Self {
            external_name: name.clone(),
            name,
            ty,
            source,
            parse_strategy,
            nested: Vec::new(),
        }
    }

    pub fn with_external_name(mut self, external_name: impl Into<String>) -> Self {
        self.external_name = external_name.into();
        self
    }
}

/// Iterate bindings and composite members as one flat sequence.
pub fn flatten(bindings: &[ParameterBinding]) -> impl Iterator<Item = &ParameterBinding> {
    bindings
        .iter()
        .flat_map(|b| std::iter::once(b).chain(b.nested.iter()))
}

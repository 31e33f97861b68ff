//! Shared fixtures: an in-memory symbol resolver and handler builders.

#![allow(dead_code)]

use waypoint_analysis::model::{
    AttributeRef, Body, CompositeShape, ConstValue, HandlerModel, HandlerParam, SymbolId,
    SymbolInfo, SymbolKind, SymbolResolver, TypeRef,
};
use waypoint_core::diagnostics::SourceLocation;
use waypoint_core::types::collections::FxHashMap;

/// A resolver backed by plain maps, populated by each test.
#[derive(Default)]
pub struct TestResolver {
    symbols: FxHashMap<SymbolId, SymbolInfo>,
    bodies: FxHashMap<SymbolId, Body>,
    composites: FxHashMap<String, CompositeShape>,
}

impl TestResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, info: SymbolInfo) -> &mut Self {
        self.symbols.insert(info.id, info);
        self
    }

    pub fn define_body(&mut self, id: SymbolId, body: Body) -> &mut Self {
        self.bodies.insert(id, body);
        self
    }

    pub fn define_composite(&mut self, type_name: &str, shape: CompositeShape) -> &mut Self {
        self.composites.insert(type_name.to_string(), shape);
        self
    }
}

impl SymbolResolver for TestResolver {
    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(&id)
    }

    fn body(&self, id: SymbolId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    fn composite_shape(&self, type_name: &str) -> Option<&CompositeShape> {
        self.composites.get(type_name)
    }
}

/// A same-unit method with a body; the common case for scan fixtures.
pub fn method(id: u64, name: &str) -> SymbolInfo {
    SymbolInfo {
        id: SymbolId(id),
        name: name.to_string(),
        kind: SymbolKind::Method,
        declaring_type: None,
        returns_result_union: false,
        has_body: true,
        same_unit: true,
        declared_outcomes: Vec::new(),
        const_value: None,
        location: SourceLocation::default(),
    }
}

/// A member of the error factory type.
pub fn factory_member(id: u64, name: &str) -> SymbolInfo {
    SymbolInfo {
        declaring_type: Some("Endpoints.ErrorResults".to_string()),
        has_body: false,
        same_unit: false,
        ..method(id, name)
    }
}

/// A bodiless interface member returning the result union.
pub fn interface_member(id: u64, name: &str, declaring: &str) -> SymbolInfo {
    SymbolInfo {
        declaring_type: Some(declaring.to_string()),
        returns_result_union: true,
        has_body: false,
        same_unit: false,
        ..method(id, name)
    }
}

/// A same-unit constant with a value, for fold fixtures.
pub fn const_symbol(id: u64, name: &str, value: ConstValue) -> SymbolInfo {
    SymbolInfo {
        kind: SymbolKind::Const,
        const_value: Some(value),
        ..method(id, name)
    }
}

/// A bare handler with no parameters and a `Task<Outcome<T>>` return type.
pub fn handler(id: u64, name: &str) -> HandlerModel {
    HandlerModel {
        id: SymbolId(id),
        name: name.to_string(),
        location: SourceLocation::new("handlers.src", 1, 1),
        attributes: Vec::new(),
        params: Vec::new(),
        return_type: TypeRef::named("Task<Outcome<UserDto>>"),
        fingerprint: HandlerModel::fingerprint_of(name),
    }
}

/// Attach a recognized verb attribute carrying a route pattern.
pub fn with_verb(mut handler: HandlerModel, verb_attr: &str, pattern: &str) -> HandlerModel {
    handler.attributes.push(
        AttributeRef::resolved(format!("Endpoints.Annotations.{verb_attr}"), verb_attr)
            .with_args(vec![ConstValue::Str(pattern.to_string())]),
    );
    handler
}

pub fn with_param(mut handler: HandlerModel, param: HandlerParam) -> HandlerModel {
    handler.params.push(param);
    handler
}

/// A resolved annotation attribute by bare name, e.g. `FromQuery`.
pub fn marker(name: &str) -> AttributeRef {
    AttributeRef::resolved(format!("Endpoints.Annotations.{name}"), name)
}

/// Same, with one string argument (name override or service key).
pub fn marker_with(name: &str, arg: &str) -> AttributeRef {
    marker(name).with_args(vec![ConstValue::Str(arg.to_string())])
}

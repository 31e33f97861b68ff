//! The immutable endpoint descriptor.

use serde::{Deserialize, Serialize};
use waypoint_core::diagnostics::SourceLocation;

use crate::binding::ParameterBinding;
use crate::model::{HttpVerb, SymbolId, TypeRef};
use crate::outcomes::ErrorOutcome;
use crate::routes::RoutePattern;

/// What the endpoint responds with on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    /// No response payload.
    Unit,
    /// A serialized value of the named type.
    Value(String),
    /// An incremental stream of values of the named type.
    Stream(String),
}

/// The unwrapped shape of a handler's return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnShape {
    pub payload: PayloadKind,
    pub is_async: bool,
    pub is_stream: bool,
}

const ASYNC_WRAPPERS: &[&str] = &["Task", "ValueTask"];
const STREAM_WRAPPERS: &[&str] = &["AsyncStream"];
const RESULT_UNION: &str = "Outcome";
const UNIT_SPELLINGS: &[&str] = &["void", "System.Void", "unit"];

impl ReturnShape {
    /// Derive the shape from a declared return type, peeling the async
    /// wrapper, the stream wrapper, and the result-union layer in that order.
    pub fn from_type(ty: &TypeRef) -> Self {
        let mut name = ty.name.as_str();
        let mut is_async = false;
        let mut is_stream = false;

        if let Some(inner) = unwrap_generic(name, ASYNC_WRAPPERS) {
            is_async = true;
            name = inner;
        }
        if outer_matches(name, ASYNC_WRAPPERS) {
            // Bare Task with no payload.
            return Self { payload: PayloadKind::Unit, is_async: true, is_stream: false };
        }
        if let Some(inner) = unwrap_generic(name, STREAM_WRAPPERS) {
            is_stream = true;
            name = inner;
        }
        if let Some(inner) = unwrap_generic(name, &[RESULT_UNION]) {
            name = inner;
        }

        let payload = if UNIT_SPELLINGS.iter().any(|u| u.eq_ignore_ascii_case(name)) {
            PayloadKind::Unit
        } else if is_stream {
            PayloadKind::Stream(name.to_string())
        } else {
            PayloadKind::Value(name.to_string())
        };
        Self { payload, is_async, is_stream }
    }
}

/// Unwrap `Outer<Inner>` when the outer spelling (namespace-insensitive)
/// is one of `outers`.
fn unwrap_generic<'a>(name: &'a str, outers: &[&str]) -> Option<&'a str> {
    let open = name.find('<')?;
    if !name.ends_with('>') {
        return None;
    }
    let outer = name[..open].rsplit('.').next().unwrap_or(&name[..open]);
    if outers.iter().any(|o| o.eq_ignore_ascii_case(outer)) {
        Some(&name[open + 1..name.len() - 1])
    } else {
        None
    }
}

fn outer_matches(name: &str, outers: &[&str]) -> bool {
    let short = name.rsplit('.').next().unwrap_or(name);
    outers.iter().any(|o| o.eq_ignore_ascii_case(short))
}

/// Identity of the handler a descriptor was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerIdentity {
    pub symbol: SymbolId,
    pub name: String,
    pub location: SourceLocation,
}

/// The final immutable record describing one resolved endpoint.
///
/// Built exactly once per (handler, attribute); re-analysis always produces
/// a fresh value, never a mutation of an old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub verb: HttpVerb,
    pub pattern: String,
    pub route: RoutePattern,
    pub handler: HandlerIdentity,
    pub return_shape: ReturnShape,
    pub bindings: Vec<ParameterBinding>,
    /// Inferred plus explicitly declared outcomes, deduplicated and sorted
    /// by canonical order.
    pub outcomes: Vec<ErrorOutcome>,
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peels_async_and_union_layers() {
        let ty = TypeRef::named("Task<Outcome<UserDto>>");
        let shape = ReturnShape::from_type(&ty);
        assert!(shape.is_async);
        assert!(!shape.is_stream);
        assert_eq!(shape.payload, PayloadKind::Value("UserDto".into()));
    }

    #[test]
    fn bare_task_is_unit() {
        let shape = ReturnShape::from_type(&TypeRef::named("Task"));
        assert!(shape.is_async);
        assert_eq!(shape.payload, PayloadKind::Unit);
    }

    #[test]
    fn stream_wrapper_is_detected() {
        let shape = ReturnShape::from_type(&TypeRef::named("AsyncStream<Event>"));
        assert!(shape.is_stream);
        assert_eq!(shape.payload, PayloadKind::Stream("Event".into()));
    }
}

//! Handler and type descriptors.

use serde::{Deserialize, Serialize};
use waypoint_core::diagnostics::SourceLocation;

use super::attributes::AttributeRef;

/// Stable identity of a declaration, assigned by the host compiler.
///
/// Identity is what keys the visited set during outcome inference; it never
/// changes across runs for an unchanged declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u64);

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a non-primitive type can still be bound from a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseStrategy {
    /// The type exposes a recognized parse-from-string member.
    Parse,
    /// The type exposes a recognized bind-from-request member.
    Bind,
}

/// A resolved type reference: name, nullability, collection shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Canonical (possibly dotted) type name, or a native alias.
    pub name: String,
    pub nullable: bool,
    /// `Some` when this is a collection; holds the element type.
    pub element: Option<Box<TypeRef>>,
    pub is_interface: bool,
    pub parse_strategy: Option<ParseStrategy>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            element: None,
            is_interface: false,
            parse_strategy: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    pub fn with_parse_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.parse_strategy = Some(strategy);
        self
    }

    pub fn collection_of(name: impl Into<String>, element: TypeRef) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            element: Some(Box::new(element)),
            is_interface: false,
            parse_strategy: None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.element.is_some()
    }

    /// Display form, with a `?` suffix for nullable types.
    pub fn display_name(&self) -> String {
        if self.nullable {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Case-insensitive type-name comparison with dotted-suffix tolerance:
/// `System.Int32` matches `Int32`, and vice versa.
pub fn type_names_match(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    dotted_suffix_matches(a, b) || dotted_suffix_matches(b, a)
}

fn dotted_suffix_matches(longer: &str, shorter: &str) -> bool {
    longer.len() > shorter.len() + 1
        && longer.as_bytes()[longer.len() - shorter.len() - 1] == b'.'
        && longer[longer.len() - shorter.len()..].eq_ignore_ascii_case(shorter)
}

/// HTTP verbs carried by endpoint attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether requests with this verb conventionally carry a body.
    pub fn has_request_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One handler parameter as declared in source.
#[derive(Debug, Clone)]
pub struct HandlerParam {
    pub name: String,
    pub ty: TypeRef,
    pub attributes: Vec<AttributeRef>,
    pub location: SourceLocation,
}

impl HandlerParam {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeRef) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A candidate handler function, fully materialized by the host.
#[derive(Debug, Clone)]
pub struct HandlerModel {
    pub id: SymbolId,
    pub name: String,
    pub location: SourceLocation,
    pub attributes: Vec<AttributeRef>,
    pub params: Vec<HandlerParam>,
    pub return_type: TypeRef,
    /// Content hash of the handler body and everything it references, as
    /// computed by the host. Keys the inference boundary cache together with
    /// the symbol id.
    pub fingerprint: u64,
}

impl HandlerModel {
    /// Hash handler source text into a cache fingerprint. Hosts that track
    /// content some other way can fill `fingerprint` directly instead.
    pub fn fingerprint_of(source: &str) -> u64 {
        xxhash_rust::xxh3::xxh3_64(source.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_suffix_matching() {
        assert!(type_names_match("System.Int32", "Int32"));
        assert!(type_names_match("Int32", "System.Int32"));
        assert!(type_names_match("int", "INT"));
        assert!(!type_names_match("System.Int32", "UInt32"));
        assert!(!type_names_match("MyInt32", "Int32"));
    }

    #[test]
    fn collection_shape() {
        let ty = TypeRef::collection_of("List", TypeRef::named("int"));
        assert!(ty.is_collection());
        assert_eq!(ty.element.as_deref().unwrap().name, "int");
    }
}

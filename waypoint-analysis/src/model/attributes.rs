//! Attribute references and the two-tier recognition table.
//!
//! When the host resolves an attribute's type, recognition keys off the full
//! type name; when resolution failed (missing reference, unresolved alias)
//! the short name is the fallback. One table, consulted in that order; no
//! ad hoc string comparisons anywhere else.

use waypoint_core::diagnostics::SourceLocation;

use super::resolution::ConstValue;
use super::types::HttpVerb;
use crate::outcomes::{ErrorOutcome, KnownKind};

/// A raw attribute as the host hands it over.
#[derive(Debug, Clone)]
pub struct AttributeRef {
    /// Fully resolved attribute type name, when the host could resolve it.
    pub type_name: Option<String>,
    /// Short source spelling, always present.
    pub short_name: String,
    /// Resolved constant arguments, in declaration order.
    pub args: Vec<ConstValue>,
    pub location: SourceLocation,
}

impl AttributeRef {
    pub fn resolved(type_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            short_name: short_name.into(),
            args: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    /// An attribute whose type the host failed to resolve.
    pub fn unresolved(short_name: impl Into<String>) -> Self {
        Self {
            type_name: None,
            short_name: short_name.into(),
            args: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<ConstValue>) -> Self {
        self.args = args;
        self
    }

    fn str_arg(&self, index: usize) -> Option<&str> {
        match self.args.get(index) {
            Some(ConstValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    fn int_arg(&self, index: usize) -> Option<i64> {
        match self.args.get(index) {
            Some(ConstValue::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Explicit binding-source markers a parameter can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Route,
    Query,
    Header,
    Body,
    Form,
    Services,
    KeyedServices,
}

/// An attribute after recognition.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedAttribute {
    /// A verb attribute with its route pattern.
    Verb { verb: HttpVerb, pattern: String },
    /// An explicit binding-source marker, with an optional name override
    /// (or service key for `KeyedServices`).
    Source { kind: MarkerKind, name: Option<String> },
    /// Marks a composite parameter expanded member-wise.
    Composite,
    /// An explicitly declared error outcome.
    DeclaredOutcome(ErrorOutcome),
    /// Marks the endpoint as responding 202 Accepted.
    AcceptedResponse,
}

const ANNOTATION_NAMESPACE: &str = "Endpoints.Annotations";

const VERBS: &[(&str, HttpVerb)] = &[
    ("HttpGet", HttpVerb::Get),
    ("HttpPost", HttpVerb::Post),
    ("HttpPut", HttpVerb::Put),
    ("HttpDelete", HttpVerb::Delete),
    ("HttpPatch", HttpVerb::Patch),
    ("HttpHead", HttpVerb::Head),
    ("HttpOptions", HttpVerb::Options),
];

const SOURCES: &[(&str, MarkerKind)] = &[
    ("FromRoute", MarkerKind::Route),
    ("FromQuery", MarkerKind::Query),
    ("FromHeader", MarkerKind::Header),
    ("FromBody", MarkerKind::Body),
    ("FromForm", MarkerKind::Form),
    ("FromServices", MarkerKind::Services),
    ("FromKeyedServices", MarkerKind::KeyedServices),
];

const COMPOSITE: &str = "AsParameters";
const DECLARED_OUTCOME: &str = "ProducesError";
const ACCEPTED: &str = "ProducesAccepted";

/// Recognize one attribute reference: resolved type name first, short-name
/// fallback only when type resolution failed.
pub fn recognize(attr: &AttributeRef) -> Option<RecognizedAttribute> {
    let short = match attr.type_name.as_deref() {
        Some(full) => strip_recognized_namespace(full)?,
        None => attr.short_name.as_str(),
    };
    recognize_short(short, attr)
}

/// Accept `Endpoints.Annotations.HttpGet`, `HttpGetAttribute`, etc., and
/// reduce to the bare annotation name.
fn strip_recognized_namespace(full: &str) -> Option<&str> {
    let bare = full.strip_prefix(ANNOTATION_NAMESPACE)?.strip_prefix('.')?;
    Some(bare)
}

fn recognize_short(name: &str, attr: &AttributeRef) -> Option<RecognizedAttribute> {
    let name = name.strip_suffix("Attribute").unwrap_or(name);

    for (spelling, verb) in VERBS {
        if name.eq_ignore_ascii_case(spelling) {
            let pattern = attr.str_arg(0).unwrap_or_default().to_string();
            return Some(RecognizedAttribute::Verb { verb: *verb, pattern });
        }
    }
    for (spelling, kind) in SOURCES {
        if name.eq_ignore_ascii_case(spelling) {
            let name_override = attr.str_arg(0).map(str::to_string);
            return Some(RecognizedAttribute::Source { kind: *kind, name: name_override });
        }
    }
    if name.eq_ignore_ascii_case(COMPOSITE) {
        return Some(RecognizedAttribute::Composite);
    }
    if name.eq_ignore_ascii_case(ACCEPTED) {
        return Some(RecognizedAttribute::AcceptedResponse);
    }
    if name.eq_ignore_ascii_case(DECLARED_OUTCOME) {
        return Some(RecognizedAttribute::DeclaredOutcome(declared_outcome(attr)?));
    }
    None
}

/// `ProducesError("NotFound")` or `ProducesError(499, "EdgeTimeout")`.
fn declared_outcome(attr: &AttributeRef) -> Option<ErrorOutcome> {
    if let Some(kind_name) = attr.str_arg(0) {
        if let Some(kind) = KnownKind::from_name(kind_name) {
            return Some(ErrorOutcome::Known(kind));
        }
    }
    let code = attr.int_arg(0)?;
    let identifier = attr.str_arg(1)?;
    Some(ErrorOutcome::Custom {
        code: u16::try_from(code).ok()?,
        identifier: identifier.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_type_name_wins() {
        let attr = AttributeRef::resolved("Endpoints.Annotations.HttpGet", "HttpGet")
            .with_args(vec![ConstValue::Str("/users/{id}".into())]);
        assert_eq!(
            recognize(&attr),
            Some(RecognizedAttribute::Verb {
                verb: HttpVerb::Get,
                pattern: "/users/{id}".into()
            })
        );
    }

    #[test]
    fn foreign_namespace_is_not_recognized_by_type() {
        let attr = AttributeRef::resolved("Other.Lib.HttpGet", "HttpGet");
        assert_eq!(recognize(&attr), None);
    }

    #[test]
    fn short_name_fallback_applies_when_unresolved() {
        let attr = AttributeRef::unresolved("FromQueryAttribute");
        assert_eq!(
            recognize(&attr),
            Some(RecognizedAttribute::Source { kind: MarkerKind::Query, name: None })
        );
    }

    #[test]
    fn declared_outcome_forms() {
        let known = AttributeRef::unresolved("ProducesError")
            .with_args(vec![ConstValue::Str("Conflict".into())]);
        assert_eq!(
            recognize(&known),
            Some(RecognizedAttribute::DeclaredOutcome(ErrorOutcome::Known(KnownKind::Conflict)))
        );

        let custom = AttributeRef::unresolved("ProducesError")
            .with_args(vec![ConstValue::Int(499), ConstValue::Str("EdgeTimeout".into())]);
        assert_eq!(
            recognize(&custom),
            Some(RecognizedAttribute::DeclaredOutcome(ErrorOutcome::Custom {
                code: 499,
                identifier: "EdgeTimeout".into()
            }))
        );
    }
}

//! The constraint classification table.
//!
//! Format-only constraints restrict string content, never the bound type.
//! Type-constraining constraints map to the type spellings they accept:
//! the native alias first, then the canonical name.

use crate::routes::{RouteConstraint, RouteParameter};

const FORMAT_ONLY: &[&str] = &[
    "min", "max", "range", "minlength", "maxlength", "length", "regex", "required", "nonfile",
];

const TYPE_CONSTRAINTS: &[(&str, &[&str])] = &[
    ("int", &["int", "System.Int32"]),
    ("long", &["long", "System.Int64"]),
    ("bool", &["bool", "System.Boolean"]),
    ("guid", &["guid", "System.Guid"]),
    ("datetime", &["datetime", "System.DateTime"]),
    ("decimal", &["decimal", "System.Decimal"]),
    ("double", &["double", "System.Double"]),
    ("float", &["float", "System.Single"]),
    ("alpha", &["string", "System.String"]),
];

/// True for constraints that never participate in type checking or
/// canonicalization.
pub fn is_format_only(name: &str) -> bool {
    FORMAT_ONLY.iter().any(|f| f.eq_ignore_ascii_case(name))
}

/// The type spellings a type-constraining constraint accepts, alias first.
/// `None` for format-only and unrecognized (user-defined) constraints.
pub fn accepted_types(name: &str) -> Option<&'static [&'static str]> {
    TYPE_CONSTRAINTS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(name))
        .map(|(_, types)| *types)
}

/// The primary constraint of a parameter: the first one that maps to a known
/// primitive type. Constraints are additive at dispatch time, but only one
/// typically restricts the runtime type.
pub fn primary_constraint(parameter: &RouteParameter) -> Option<&RouteConstraint> {
    parameter
        .constraints
        .iter()
        .find(|c| accepted_types(&c.name).is_some())
}

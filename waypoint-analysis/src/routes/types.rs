//! Route pattern types.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One named restriction on a route parameter, e.g. `int` or `min(5)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConstraint {
    pub name: String,
    pub argument: Option<String>,
}

impl RouteConstraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), argument: None }
    }

    pub fn with_argument(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self { name: name.into(), argument: Some(argument.into()) }
    }
}

/// One `{...}` group extracted from a route pattern.
///
/// Ephemeral: lives only for the duration of one attribute's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParameter {
    pub name: String,
    pub constraints: SmallVec<[RouteConstraint; 2]>,
    pub optional: bool,
    pub catch_all: bool,
}

impl RouteParameter {
    /// Reconstruct the structural signature `{*name:c1:c2(arg)?}`.
    /// Re-parsing this signature reproduces the parameter exactly.
    pub fn signature(&self) -> String {
        let mut out = String::from("{");
        if self.catch_all {
            out.push('*');
        }
        out.push_str(&self.name);
        for c in &self.constraints {
            out.push(':');
            out.push_str(&c.name);
            if let Some(arg) = &c.argument {
                out.push('(');
                out.push_str(arg);
                out.push(')');
            }
        }
        if self.optional {
            out.push('?');
        }
        out.push('}');
        out
    }
}

/// A parsed route pattern: the raw text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    pub raw: String,
    pub parameters: Vec<RouteParameter>,
}

impl RoutePattern {
    /// Case-insensitive lookup of a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&RouteParameter> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

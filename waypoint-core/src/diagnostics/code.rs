//! The stable diagnostic enumeration.
//!
//! Codes are category-prefixed and versioned: a code's string form, severity,
//! and message shape are external surface. Changing any of them is a breaking
//! change and must be tracked in the changelog.

use serde::{Deserialize, Serialize};

/// Diagnostic severity. `Error` is expected to fail the host build;
/// `Warning` and `Info` are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every diagnostic the engine can raise. Severity is fixed per code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Route pattern structure
    RouteEmptyPattern,
    RouteEmptyParameter,
    RouteUnbalancedBraces,
    RouteInvalidParameterName,
    RouteDuplicateParameter,
    RouteOptionalNotLast,
    RouteCatchAllNotLast,
    // Parameter binding
    BindMultipleBodySources,
    BindBodyOnBodylessVerb,
    BindCompositeOfComposite,
    BindDuplicateName,
    BindUnboundRouteParameter,
    // Constraint/type checking
    ConstraintTypeMismatch,
    ConstraintCatchAllNotString,
    // Error-outcome inference
    InferUndocumentedInterfaceCall,
    InferUnknownErrorFactory,
    InferUnfoldableCustomOutcome,
    InferScanBudgetExceeded,
    // Cross-cutting
    DuplicateRoute,
}

impl DiagnosticCode {
    /// The stable, category-prefixed string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RouteEmptyPattern => "WAY-ROUTE-001",
            Self::RouteEmptyParameter => "WAY-ROUTE-002",
            Self::RouteUnbalancedBraces => "WAY-ROUTE-003",
            Self::RouteInvalidParameterName => "WAY-ROUTE-004",
            Self::RouteDuplicateParameter => "WAY-ROUTE-005",
            Self::RouteOptionalNotLast => "WAY-ROUTE-006",
            Self::RouteCatchAllNotLast => "WAY-ROUTE-007",
            Self::BindMultipleBodySources => "WAY-BIND-001",
            Self::BindBodyOnBodylessVerb => "WAY-BIND-002",
            Self::BindCompositeOfComposite => "WAY-BIND-003",
            Self::BindDuplicateName => "WAY-BIND-004",
            Self::BindUnboundRouteParameter => "WAY-BIND-005",
            Self::ConstraintTypeMismatch => "WAY-CONSTRAINT-001",
            Self::ConstraintCatchAllNotString => "WAY-CONSTRAINT-002",
            Self::InferUndocumentedInterfaceCall => "WAY-INFER-001",
            Self::InferUnknownErrorFactory => "WAY-INFER-002",
            Self::InferUnfoldableCustomOutcome => "WAY-INFER-003",
            Self::InferScanBudgetExceeded => "WAY-INFER-004",
            Self::DuplicateRoute => "WAY-DUP-001",
        }
    }

    /// Fixed severity for this code.
    pub fn severity(&self) -> Severity {
        match self {
            Self::RouteEmptyPattern
            | Self::RouteEmptyParameter
            | Self::RouteUnbalancedBraces
            | Self::RouteInvalidParameterName
            | Self::RouteDuplicateParameter
            | Self::RouteCatchAllNotLast
            | Self::BindMultipleBodySources
            | Self::BindBodyOnBodylessVerb
            | Self::BindCompositeOfComposite
            | Self::InferUndocumentedInterfaceCall
            | Self::InferScanBudgetExceeded
            | Self::DuplicateRoute => Severity::Error,
            Self::RouteOptionalNotLast
            | Self::BindDuplicateName
            | Self::BindUnboundRouteParameter
            | Self::ConstraintTypeMismatch
            | Self::ConstraintCatchAllNotString
            | Self::InferUnknownErrorFactory => Severity::Warning,
            Self::InferUnfoldableCustomOutcome => Severity::Info,
        }
    }

    /// The message template. `{0}`, `{1}`… are replaced by positional args.
    pub fn template(&self) -> &'static str {
        match self {
            Self::RouteEmptyPattern => "Route pattern is empty",
            Self::RouteEmptyParameter => "Route pattern '{0}' contains an empty parameter '{{}}'",
            Self::RouteUnbalancedBraces => "Route pattern '{0}' has unbalanced braces",
            Self::RouteInvalidParameterName => "Route parameter name '{0}' is not valid",
            Self::RouteDuplicateParameter => "Route parameter '{0}' is declared more than once",
            Self::RouteOptionalNotLast => "Optional route parameter '{0}' is not the last segment",
            Self::RouteCatchAllNotLast => "Catch-all route parameter '{0}' must terminate the pattern",
            Self::BindMultipleBodySources => "Handler binds more than one request-body source: {0} and {1}",
            Self::BindBodyOnBodylessVerb => "Parameter '{0}' of type '{1}' cannot be bound from the body of a {2} request",
            Self::BindCompositeOfComposite => "Composite parameter '{0}' contains nested composite member '{1}'",
            Self::BindDuplicateName => "Binding name '{0}' is already claimed by parameter '{1}'; '{2}' is ignored",
            Self::BindUnboundRouteParameter => "Route parameter '{0}' is not bound by any handler parameter",
            Self::ConstraintTypeMismatch => "Route constraint '{0}' expects type '{1}' but parameter '{2}' is declared as '{3}'",
            Self::ConstraintCatchAllNotString => "Catch-all parameter '{0}' must bind to a string type, found '{1}'",
            Self::InferUndocumentedInterfaceCall => "Call to '{0}' has no declared error outcomes and the handler declares none; generated documentation would be incomplete",
            Self::InferUnknownErrorFactory => "Unknown error factory member '{0}'",
            Self::InferUnfoldableCustomOutcome => "Arguments of the custom error outcome could not be evaluated at compile time",
            Self::InferScanBudgetExceeded => "Symbol scan for handler '{0}' exceeded the budget of {1} visited declarations",
            Self::DuplicateRoute => "Route '{0} {1}' is already registered by handler '{2}'",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

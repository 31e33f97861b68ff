//! Cross-check of route constraints against bound parameter types.

use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, SourceLocation};

use crate::binding::{self, BindingSource, ParameterBinding};
use crate::model::{type_names_match, ResolutionContext};
use crate::routes::RoutePattern;

use super::table::{accepted_types, primary_constraint};

/// Check every route parameter's primary constraint against the type of the
/// binding that claims it. All findings are advisory warnings; a mismatch
/// will misbehave at runtime but the route still registers.
pub fn check_constraints(
    ctx: &ResolutionContext,
    route: &RoutePattern,
    bindings: &[ParameterBinding],
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) {
    for parameter in &route.parameters {
        if parameter.name.is_empty() {
            continue;
        }
        let Some(bound) = route_binding(bindings, &parameter.name) else {
            continue; // unbound parameters are the resolver's finding
        };

        // Catch-alls capture the remaining path verbatim; only a string
        // type can hold that, whatever the declared constraint says.
        if parameter.catch_all {
            if !ctx.well_known.is_string_type(&bound.ty.name) {
                sink.report(
                    DiagnosticCode::ConstraintCatchAllNotString,
                    location.clone(),
                    [parameter.name.clone(), bound.ty.display_name()],
                );
            }
            continue;
        }

        let Some(constraint) = primary_constraint(parameter) else {
            continue; // format-only or user-defined constraints: unverifiable
        };
        let Some(accepted) = accepted_types(&constraint.name) else {
            continue;
        };

        // Unwrap one nullable layer before comparing when either side
        // allows absence.
        let declared = if parameter.optional || bound.ty.nullable {
            unwrap_nullable(&bound.ty.name)
        } else {
            bound.ty.name.as_str()
        };

        let matches = accepted
            .iter()
            .any(|spelling| type_names_match(declared, spelling));
        if !matches {
            sink.report(
                DiagnosticCode::ConstraintTypeMismatch,
                location.clone(),
                [
                    constraint.name.clone(),
                    accepted[0].to_string(),
                    parameter.name.clone(),
                    bound.ty.display_name(),
                ],
            );
        }
    }
}

/// Strip one layer of nullable spelling: a `?` suffix or a
/// `Nullable<...>` wrapper.
fn unwrap_nullable(name: &str) -> &str {
    if let Some(stripped) = name.strip_suffix('?') {
        return stripped;
    }
    name.strip_prefix("Nullable<")
        .or_else(|| name.strip_prefix("System.Nullable<"))
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(name)
}

/// Find the (possibly composite-nested) binding claiming a route parameter.
fn route_binding<'a>(
    bindings: &'a [ParameterBinding],
    route_name: &str,
) -> Option<&'a ParameterBinding> {
    binding::types::flatten(bindings)
        .find(|b| b.source == BindingSource::Route && b.external_name.eq_ignore_ascii_case(route_name))
}

//! Descriptor assembly.

use std::collections::BTreeSet;

use crate::binding::ParameterBinding;
use crate::model::{HandlerModel, HttpVerb};
use crate::outcomes::ErrorOutcome;
use crate::routes::RoutePattern;

use super::types::{EndpointDescriptor, HandlerIdentity, ReturnShape};

/// Assemble one descriptor for a (handler, verb attribute) pair.
///
/// The caller has already verified that the attribute's diagnostic scope is
/// free of Error-severity findings; this function only assembles. Inferred
/// and declared outcomes are merged, deduplicated, and canonically ordered
/// here so every descriptor carries the same outcome set for the same
/// handler regardless of attribute order.
pub fn build_descriptor(
    handler: &HandlerModel,
    verb: HttpVerb,
    route: RoutePattern,
    bindings: Vec<ParameterBinding>,
    inferred: &[ErrorOutcome],
    declared: &[ErrorOutcome],
    accepted: bool,
) -> EndpointDescriptor {
    let merged: BTreeSet<ErrorOutcome> =
        inferred.iter().cloned().chain(declared.iter().cloned()).collect();

    EndpointDescriptor {
        verb,
        pattern: route.raw.clone(),
        route,
        handler: HandlerIdentity {
            symbol: handler.id,
            name: handler.name.clone(),
            location: handler.location.clone(),
        },
        return_shape: ReturnShape::from_type(&handler.return_type),
        bindings,
        outcomes: merged.into_iter().collect(),
        accepted,
    }
}

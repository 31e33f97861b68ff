//! Duplicate route detection, the final barrier pass.
//!
//! Runs single-threaded over the complete descriptor list after the map
//! phase has merged; a collision can only be judged with every descriptor
//! in hand.

use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink};
use waypoint_core::types::collections::FxHashMap;

use crate::descriptor::EndpointDescriptor;
use crate::routes::canonical_route_key;

/// Report every descriptor whose canonical dispatch key repeats an earlier
/// one. The first occurrence wins; later ones are reported against it.
pub fn detect_duplicate_routes(descriptors: &[EndpointDescriptor], sink: &mut DiagnosticSink) {
    let mut first_by_key: FxHashMap<String, &EndpointDescriptor> = FxHashMap::default();

    for descriptor in descriptors {
        let key = canonical_route_key(descriptor.verb, &descriptor.route);
        match first_by_key.get(key.as_str()) {
            Some(first) => {
                sink.report(
                    DiagnosticCode::DuplicateRoute,
                    descriptor.handler.location.clone(),
                    [
                        descriptor.verb.as_str(),
                        descriptor.pattern.as_str(),
                        first.handler.name.as_str(),
                    ],
                );
            }
            None => {
                first_by_key.insert(key, descriptor);
            }
        }
    }
}

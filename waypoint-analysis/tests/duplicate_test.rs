//! Duplicate route detection over canonical dispatch keys.

mod common;

use common::*;
use waypoint_analysis::descriptor::{build_descriptor, EndpointDescriptor};
use waypoint_analysis::duplicates::detect_duplicate_routes;
use waypoint_analysis::model::HttpVerb;
use waypoint_analysis::routes::parse_route_pattern;
use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, SourceLocation};

fn descriptor(id: u64, name: &str, verb: HttpVerb, pattern: &str) -> EndpointDescriptor {
    let mut sink = DiagnosticSink::new();
    let route = parse_route_pattern(pattern, &SourceLocation::default(), &mut sink)
        .expect("test patterns are non-empty");
    assert!(sink.is_empty(), "fixture pattern must parse cleanly");
    build_descriptor(&handler(id, name), verb, route, Vec::new(), &[], &[], false)
}

fn detect(descriptors: &[EndpointDescriptor]) -> DiagnosticSink {
    let mut sink = DiagnosticSink::new();
    detect_duplicate_routes(descriptors, &mut sink);
    sink
}

#[test]
fn renamed_parameter_still_collides() {
    let sink = detect(&[
        descriptor(1, "GetByX", HttpVerb::Get, "/items/{x:int}"),
        descriptor(2, "GetByY", HttpVerb::Get, "/items/{y:int}"),
    ]);
    let diagnostic = sink.iter().next().unwrap();
    assert_eq!(diagnostic.code, DiagnosticCode::DuplicateRoute);
    assert_eq!(sink.error_count(), 1);
    // Reported against the later handler, naming the first.
    assert_eq!(diagnostic.args.as_slice(), ["GET", "/items/{y:int}", "GetByX"]);
}

#[test]
fn different_type_constraints_do_not_collide() {
    let sink = detect(&[
        descriptor(1, "ById", HttpVerb::Get, "/items/{id:int}"),
        descriptor(2, "ByKey", HttpVerb::Get, "/items/{key:guid}"),
    ]);
    assert!(sink.is_empty());
}

#[test]
fn different_verbs_do_not_collide() {
    let sink = detect(&[
        descriptor(1, "Get", HttpVerb::Get, "/items/{id}"),
        descriptor(2, "Replace", HttpVerb::Put, "/items/{id}"),
    ]);
    assert!(sink.is_empty());
}

#[test]
fn slash_variants_collide_after_normalization() {
    let sink = detect(&[
        descriptor(1, "A", HttpVerb::Get, "/users"),
        descriptor(2, "B", HttpVerb::Get, "users/"),
    ]);
    assert_eq!(sink.len(), 1);
}

#[test]
fn every_later_duplicate_is_reported_against_the_first() {
    let sink = detect(&[
        descriptor(1, "First", HttpVerb::Get, "/a/{x}"),
        descriptor(2, "Second", HttpVerb::Get, "/a/{y}"),
        descriptor(3, "Third", HttpVerb::Get, "/a/{z}"),
    ]);
    assert_eq!(sink.len(), 2);
    assert!(sink.iter().all(|d| d.args[2] == "First"));
}

//! Route pattern parsing, diagnostics, and canonicalization.

use proptest::prelude::*;
use waypoint_analysis::model::HttpVerb;
use waypoint_analysis::routes::{canonical_route_key, parse_route_pattern, RoutePattern};
use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, Severity, SourceLocation};

fn parse(pattern: &str) -> (Option<RoutePattern>, DiagnosticSink) {
    let mut sink = DiagnosticSink::new();
    let result = parse_route_pattern(pattern, &SourceLocation::default(), &mut sink);
    (result, sink)
}

fn codes(sink: &DiagnosticSink) -> Vec<DiagnosticCode> {
    sink.iter().map(|d| d.code).collect()
}

#[test]
fn empty_pattern_is_the_only_fatal_case() {
    let (result, sink) = parse("   ");
    assert!(result.is_none());
    assert_eq!(codes(&sink), [DiagnosticCode::RouteEmptyPattern]);
    assert_eq!(sink.error_count(), 1);
}

#[test]
fn parameters_are_extracted_in_order() {
    let (result, sink) = parse("/users/{id:int}/posts/{slug}");
    assert!(sink.is_empty());
    let pattern = result.unwrap();
    assert_eq!(pattern.parameters.len(), 2);
    assert_eq!(pattern.parameters[0].name, "id");
    assert_eq!(pattern.parameters[0].constraints[0].name, "int");
    assert_eq!(pattern.parameters[1].name, "slug");
    assert!(pattern.parameters[1].constraints.is_empty());
}

#[test]
fn empty_group_yields_placeholder_and_error() {
    let (result, sink) = parse("/x/{}");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteEmptyParameter]);
    // The malformed group still occupies a parameter slot.
    assert_eq!(result.unwrap().parameters.len(), 1);
}

#[test]
fn invalid_parameter_name_is_reported() {
    let (result, sink) = parse("/x/{9bad}");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteInvalidParameterName]);
    assert_eq!(result.unwrap().parameters[0].name, "9bad");
}

#[test]
fn unbalanced_braces_are_reported_once() {
    let (result, sink) = parse("/x/{id");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteUnbalancedBraces]);
    assert!(result.is_some());

    let (_, sink) = parse("/x/id}");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteUnbalancedBraces]);
}

#[test]
fn duplicate_names_collide_case_insensitively() {
    let (_, sink) = parse("/a/{id}/b/{ID}");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteDuplicateParameter]);
    assert_eq!(sink.error_count(), 1);
}

#[test]
fn catch_all_must_terminate_the_pattern() {
    let (_, sink) = parse("/files/{*rest}/tail");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteCatchAllNotLast]);

    let (result, sink) = parse("/files/{*rest}");
    assert!(sink.is_empty());
    assert!(result.unwrap().parameters[0].catch_all);
}

#[test]
fn optional_before_last_is_a_warning_only() {
    let (result, sink) = parse("/a/{x?}/b/{y}");
    assert_eq!(codes(&sink), [DiagnosticCode::RouteOptionalNotLast]);
    assert_eq!(sink.error_count(), 0);
    assert_eq!(DiagnosticCode::RouteOptionalNotLast.severity(), Severity::Warning);
    // Both parameters survive.
    assert_eq!(result.unwrap().parameters.len(), 2);
}

#[test]
fn constraint_arguments_are_preserved() {
    let (result, sink) = parse("/f/{name:alpha:minlength(2)}");
    assert!(sink.is_empty());
    let pattern = result.unwrap();
    let constraints = &pattern.parameters[0].constraints;
    assert_eq!(constraints[0].name, "alpha");
    assert_eq!(constraints[1].name, "minlength");
    assert_eq!(constraints[1].argument.as_deref(), Some("2"));
}

#[test]
fn diagnostic_message_interpolates_arguments() {
    let (_, sink) = parse("/a/{id}/b/{id}");
    let message = sink.iter().next().unwrap().message();
    assert!(message.contains("id"), "unexpected message: {message}");
}

#[test]
fn canonical_key_ignores_names_but_not_constraints() {
    let key = |raw: &str| {
        let (result, _) = parse(raw);
        canonical_route_key(HttpVerb::Get, &result.unwrap())
    };
    assert_eq!(key("/a/{x:int}"), key("/a/{y:int}"));
    assert_ne!(key("/a/{x:int}"), key("/a/{x:guid}"));
    assert_ne!(key("/a/{x}"), key("/a/{*x}"));
}

#[test]
fn canonical_key_distinguishes_verbs() {
    let (result, _) = parse("/users");
    let pattern = result.unwrap();
    assert_ne!(
        canonical_route_key(HttpVerb::Get, &pattern),
        canonical_route_key(HttpVerb::Post, &pattern)
    );
}

prop_compose! {
    fn valid_name()(head in "[a-z_]", tail in "[a-z0-9_]{0,7}") -> String {
        format!("{head}{tail}")
    }
}

prop_compose! {
    fn constraint_text()(
        name in prop::sample::select(vec!["int", "guid", "alpha", "widget"]),
        arg in prop::option::of("[0-9]{1,3}"),
    ) -> String {
        match arg {
            Some(arg) => format!("{name}({arg})"),
            None => name.to_string(),
        }
    }
}

proptest! {
    /// Every group costs exactly one parameter slot, whatever its content.
    #[test]
    fn group_count_equals_parameter_count(names in prop::collection::vec(valid_name(), 1..6)) {
        let pattern: String = names.iter().map(|n| format!("/{{{n}}}")).collect();
        let (result, _) = parse(&pattern);
        let parsed = result.unwrap();
        prop_assert_eq!(parsed.parameters.len(), names.len());
        for (parameter, name) in parsed.parameters.iter().zip(&names) {
            prop_assert_eq!(&parameter.name, name);
        }
    }

    /// Re-parsing a parameter's reconstructed signature reproduces it.
    #[test]
    fn signature_roundtrips(
        name in valid_name(),
        catch_all in any::<bool>(),
        optional in any::<bool>(),
        constraints in prop::collection::vec(constraint_text(), 0..3),
    ) {
        let mut text = String::from("{");
        if catch_all {
            text.push('*');
        }
        text.push_str(&name);
        for c in &constraints {
            text.push(':');
            text.push_str(c);
        }
        if optional {
            text.push('?');
        }
        text.push('}');

        let (result, _) = parse(&text);
        let first = result.unwrap().parameters.remove(0);
        let (reparsed, _) = parse(&first.signature());
        prop_assert_eq!(&reparsed.unwrap().parameters[0], &first);
    }
}

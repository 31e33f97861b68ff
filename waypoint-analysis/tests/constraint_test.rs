//! Constraint cross-checks against bound parameter types.

use waypoint_analysis::binding::{BindingSource, ParameterBinding};
use waypoint_analysis::constraints::check_constraints;
use waypoint_analysis::model::{ResolutionContext, TypeRef};
use waypoint_analysis::routes::parse_route_pattern;
use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, Severity, SourceLocation};

fn check(pattern: &str, bindings: &[ParameterBinding]) -> DiagnosticSink {
    let ctx = ResolutionContext::new();
    let mut sink = DiagnosticSink::new();
    let location = SourceLocation::default();
    let route = parse_route_pattern(pattern, &location, &mut sink)
        .expect("test patterns are non-empty");
    assert!(sink.is_empty(), "pattern fixture must parse cleanly");
    check_constraints(&ctx, &route, bindings, &location, &mut sink);
    sink
}

fn route_binding(name: &str, ty: TypeRef) -> ParameterBinding {
    ParameterBinding::new(name, ty, BindingSource::Route)
}

#[test]
fn matching_constraint_and_type_is_silent() {
    let sink = check("/users/{id:int}", &[route_binding("id", TypeRef::named("int"))]);
    assert!(sink.is_empty());
}

#[test]
fn canonical_spelling_matches_the_alias_constraint() {
    let sink = check("/users/{id:int}", &[route_binding("id", TypeRef::named("System.Int32"))]);
    assert!(sink.is_empty());
}

#[test]
fn mismatch_is_an_advisory_warning() {
    let sink = check("/users/{id:int}", &[route_binding("id", TypeRef::named("string"))]);
    let diagnostic = sink.iter().next().unwrap();
    assert_eq!(diagnostic.code, DiagnosticCode::ConstraintTypeMismatch);
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert_eq!(sink.error_count(), 0);
    let message = diagnostic.message();
    assert!(message.contains("int"), "unexpected message: {message}");
}

#[test]
fn optional_parameter_unwraps_nullable_spellings() {
    let sink = check("/users/{id:int?}", &[route_binding("id", TypeRef::named("int").nullable())]);
    assert!(sink.is_empty());

    let sink = check(
        "/users/{id:int?}",
        &[route_binding("id", TypeRef::named("Nullable<System.Int32>"))],
    );
    assert!(sink.is_empty());
}

#[test]
fn catch_all_requires_a_string_type() {
    let sink = check("/files/{*path:int}", &[route_binding("path", TypeRef::named("int"))]);
    // The string requirement preempts the declared constraint.
    let codes: Vec<_> = sink.iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::ConstraintCatchAllNotString]);

    let sink = check("/files/{*path}", &[route_binding("path", TypeRef::named("string"))]);
    assert!(sink.is_empty());
}

#[test]
fn format_only_and_unrecognized_constraints_are_not_checked() {
    let sink = check(
        "/f/{name:minlength(3)}",
        &[route_binding("name", TypeRef::named("int"))],
    );
    assert!(sink.is_empty());

    let sink = check("/f/{id:widget}", &[route_binding("id", TypeRef::named("string"))]);
    assert!(sink.is_empty());
}

#[test]
fn unbound_parameters_are_left_to_the_binding_pass() {
    let sink = check("/users/{id:int}", &[]);
    assert!(sink.is_empty());
}

#[test]
fn first_type_constraint_is_primary() {
    let sink = check(
        "/f/{v:min(1):guid}",
        &[route_binding("v", TypeRef::named("System.Guid"))],
    );
    assert!(sink.is_empty());
}

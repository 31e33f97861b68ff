//! Binding-source resolution.
//!
//! Each handler parameter is assigned exactly one binding source by an
//! ordered, first-match-wins rule chain: explicit markers, recognized
//! context types, structural type matches, route-name matches, service
//! heuristics, then the query/body residual split. Composite parameters
//! expand one level into member bindings resolved by the same chain.

use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, SourceLocation};

use crate::model::attributes::{recognize, MarkerKind, RecognizedAttribute};
use crate::model::{
    AttributeRef, HandlerModel, HttpVerb, ResolutionContext, SymbolResolver, TypeRef,
};
use crate::routes::RoutePattern;

use super::types::{flatten, BindingSource, ParameterBinding};

/// Service-type suffix heuristics for unmarked interface-free DI types.
const SERVICE_SUFFIXES: &[&str] =
    &["Repository", "Handler", "Manager", "Provider", "Factory", "Client"];

/// Resolve all bindings for one handler under one verb attribute.
pub fn resolve_bindings(
    ctx: &ResolutionContext,
    resolver: &dyn SymbolResolver,
    handler: &HandlerModel,
    verb: HttpVerb,
    route: &RoutePattern,
    sink: &mut DiagnosticSink,
) -> Vec<ParameterBinding> {
    let mut explicit_bodies = 0usize;
    let mut bindings = Vec::with_capacity(handler.params.len());

    for param in &handler.params {
        let binding = resolve_single(
            ctx,
            resolver,
            &param.name,
            &param.ty,
            &param.attributes,
            &param.location,
            verb,
            route,
            true,
            &mut explicit_bodies,
            sink,
        );
        bindings.push(binding);
    }

    check_body_buckets(&bindings, explicit_bodies, &handler.location, sink);
    check_duplicate_names(&bindings, &handler.location, sink);
    check_unbound_route_parameters(&bindings, route, &handler.location, sink);

    bindings
}

/// Resolve one parameter or composite member. `allow_composite` is true only
/// at the top level; composite-of-composite is rejected by the caller.
#[allow(clippy::too_many_arguments)]
fn resolve_single(
    ctx: &ResolutionContext,
    resolver: &dyn SymbolResolver,
    name: &str,
    ty: &TypeRef,
    attributes: &[AttributeRef],
    location: &SourceLocation,
    verb: HttpVerb,
    route: &RoutePattern,
    allow_composite: bool,
    explicit_bodies: &mut usize,
    sink: &mut DiagnosticSink,
) -> ParameterBinding {
    // 1. Explicit composite marker.
    if has_composite_marker(attributes) && allow_composite {
        return expand_composite(ctx, resolver, name, ty, location, verb, route, explicit_bodies, sink);
    }

    // 2. Explicit source marker, honoring a name override.
    if let Some((kind, name_override)) = explicit_marker(attributes) {
        let source = marker_source(ctx, kind, ty, &name_override);
        if source == BindingSource::Body {
            *explicit_bodies += 1;
        }
        let mut binding = ParameterBinding::new(name, ty.clone(), source);
        if let Some(external) = name_override {
            binding = binding.with_external_name(external);
        }
        return binding;
    }

    // 3. Recognized runtime-context types.
    if ctx.well_known.is_cancellation(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::Cancellation);
    }
    if ctx.well_known.is_request_context(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::SpecialContext);
    }

    // 4. Structural type matches.
    if ctx.well_known.is_byte_stream(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::Stream);
    }
    if ctx.well_known.is_raw_reader(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::RawReader);
    }
    if ctx.well_known.is_form_file(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::FormFile);
    }
    if ctx.well_known.is_form_file_collection(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::FormFileCollection);
    }
    if ctx.well_known.is_form_collection(ty) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::FormCollection);
    }

    // 5. Simple-or-parseable type whose name matches a route parameter.
    if is_simple_or_parseable(ctx, ty) && !ty.is_collection() && route.parameter(name).is_some() {
        return ParameterBinding::new(name, ty.clone(), BindingSource::Route);
    }

    // 6. Interface or DI-pattern-named type.
    if ty.is_interface || has_service_suffix(&ty.name) {
        return ParameterBinding::new(name, ty.clone(), BindingSource::Service);
    }

    // 7. Remaining simple (or collection-of-simple) type.
    if is_simple_or_parseable(ctx, ty)
        || ty
            .element
            .as_deref()
            .is_some_and(|el| is_simple_or_parseable(ctx, el))
    {
        return ParameterBinding::new(name, ty.clone(), BindingSource::Query);
    }

    // 8. Remaining complex type: body, or a hard error on bodyless verbs.
    if !verb.has_request_body() {
        sink.report(
            DiagnosticCode::BindBodyOnBodylessVerb,
            location.clone(),
            [name, ty.display_name().as_str(), verb.as_str()],
        );
    }
    ParameterBinding::new(name, ty.clone(), BindingSource::Body)
}

/// Expand a composite parameter one level into member bindings.
#[allow(clippy::too_many_arguments)]
fn expand_composite(
    ctx: &ResolutionContext,
    resolver: &dyn SymbolResolver,
    name: &str,
    ty: &TypeRef,
    location: &SourceLocation,
    verb: HttpVerb,
    route: &RoutePattern,
    explicit_bodies: &mut usize,
    sink: &mut DiagnosticSink,
) -> ParameterBinding {
    let mut parent = ParameterBinding::new(name, ty.clone(), BindingSource::Composite);
    let Some(shape) = resolver.composite_shape(&ty.name) else {
        return parent;
    };

    // Primary-constructor parameters first, then properties not already
    // claimed by a constructor parameter of the same name.
    let claimed: Vec<String> = shape
        .ctor_params
        .iter()
        .map(|m| m.name.to_ascii_lowercase())
        .collect();
    let members = shape.ctor_params.iter().chain(
        shape
            .properties
            .iter()
            .filter(|p| !claimed.contains(&p.name.to_ascii_lowercase())),
    );

    for member in members {
        if has_composite_marker(&member.attributes) {
            sink.report(
                DiagnosticCode::BindCompositeOfComposite,
                location.clone(),
                [name, member.name.as_str()],
            );
            continue;
        }
        let nested = resolve_single(
            ctx,
            resolver,
            &member.name,
            &member.ty,
            &member.attributes,
            location,
            verb,
            route,
            false,
            explicit_bodies,
            sink,
        );
        parent.nested.push(nested);
    }

    parent
}

fn has_composite_marker(attributes: &[AttributeRef]) -> bool {
    attributes
        .iter()
        .any(|a| recognize(a) == Some(RecognizedAttribute::Composite))
}

fn explicit_marker(attributes: &[AttributeRef]) -> Option<(MarkerKind, Option<String>)> {
    attributes.iter().find_map(|a| match recognize(a) {
        Some(RecognizedAttribute::Source { kind, name }) => Some((kind, name)),
        _ => None,
    })
}

/// Map an explicit marker to a binding source. Form markers refine to the
/// specific form source by the parameter's type.
fn marker_source(
    ctx: &ResolutionContext,
    kind: MarkerKind,
    ty: &TypeRef,
    name_override: &Option<String>,
) -> BindingSource {
    match kind {
        MarkerKind::Route => BindingSource::Route,
        MarkerKind::Query => BindingSource::Query,
        MarkerKind::Header => BindingSource::Header,
        MarkerKind::Body => BindingSource::Body,
        MarkerKind::Form => {
            if ctx.well_known.is_form_file(ty) {
                BindingSource::FormFile
            } else if ctx.well_known.is_form_file_collection(ty) {
                BindingSource::FormFileCollection
            } else if ctx.well_known.is_form_collection(ty) {
                BindingSource::FormCollection
            } else {
                BindingSource::Form
            }
        }
        MarkerKind::Services => BindingSource::Service,
        MarkerKind::KeyedServices => {
            BindingSource::KeyedService(name_override.clone().unwrap_or_default())
        }
    }
}

fn is_simple_or_parseable(ctx: &ResolutionContext, ty: &TypeRef) -> bool {
    ctx.well_known.is_simple_type(&ty.name) || ty.parse_strategy.is_some()
}

fn has_service_suffix(type_name: &str) -> bool {
    let short = type_name.rsplit('.').next().unwrap_or(type_name);
    SERVICE_SUFFIXES.iter().any(|suffix| {
        short.len() > suffix.len() && short.ends_with(suffix)
    })
}

/// More than one distinct body-like bucket, or more than one explicit Body
/// parameter, is a definite runtime failure.
fn check_body_buckets(
    bindings: &[ParameterBinding],
    explicit_bodies: usize,
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) {
    let consumers: Vec<&ParameterBinding> = flatten(bindings)
        .filter(|b| b.source.body_bucket().is_some())
        .collect();

    let mut distinct: Vec<_> = consumers
        .iter()
        .filter_map(|b| b.source.body_bucket())
        .collect();
    distinct.sort_unstable_by_key(|b| b.name());
    distinct.dedup();

    let body_sources = consumers
        .iter()
        .filter(|b| b.source == BindingSource::Body)
        .count();

    if distinct.len() > 1 || explicit_bodies > 1 || body_sources > 1 {
        let first = consumers.first().map(|b| b.name.as_str()).unwrap_or_default();
        let second = consumers.get(1).map(|b| b.name.as_str()).unwrap_or_default();
        sink.report(
            DiagnosticCode::BindMultipleBodySources,
            location.clone(),
            [first, second],
        );
    }
}

/// First wins on duplicate external names; each later claimant is flagged.
/// Collisions are per lookup space: two query keys collide, a query key and
/// a header name do not.
fn check_duplicate_names(
    bindings: &[ParameterBinding],
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) {
    let mut seen: Vec<(&'static str, String, &str)> = Vec::new();
    for binding in flatten(bindings) {
        let space = match binding.source {
            BindingSource::Route => "route",
            BindingSource::Query => "query",
            BindingSource::Header => "header",
            BindingSource::Form | BindingSource::FormFile => "form",
            _ => continue,
        };
        let key = binding.external_name.to_ascii_lowercase();
        match seen.iter().find(|(s, k, _)| *s == space && *k == key) {
            Some((_, _, first)) => {
                sink.report(
                    DiagnosticCode::BindDuplicateName,
                    location.clone(),
                    [binding.external_name.as_str(), *first, binding.name.as_str()],
                );
            }
            None => seen.push((space, key, &binding.name)),
        }
    }
}

/// Every named route parameter should be claimed by a Route binding.
fn check_unbound_route_parameters(
    bindings: &[ParameterBinding],
    route: &RoutePattern,
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) {
    for parameter in &route.parameters {
        if parameter.name.is_empty() {
            continue;
        }
        let claimed = flatten(bindings).any(|b| {
            b.source == BindingSource::Route
                && b.external_name.eq_ignore_ascii_case(&parameter.name)
        });
        if !claimed {
            sink.report(
                DiagnosticCode::BindUnboundRouteParameter,
                location.clone(),
                [parameter.name.as_str()],
            );
        }
    }
}

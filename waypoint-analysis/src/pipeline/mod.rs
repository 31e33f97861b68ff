//! The analysis pipeline: parallel map over handlers, deterministic merge,
//! single-threaded barrier reduce.
//!
//! Per-handler analysis is purely functional: each worker owns its sink and
//! result vector, and the ordered collect makes the merged output identical
//! for identical input, byte for byte, including diagnostic order. Downstream
//! caching keys off result equality, so determinism is correctness, not
//! polish.

use std::sync::Arc;
use std::time::Instant;

use moka::sync::Cache;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use waypoint_core::cancel::{Cancellable, CancellationToken};
use waypoint_core::diagnostics::{Diagnostic, DiagnosticSink, SourceLocation};
use waypoint_core::errors::AnalysisError;
use waypoint_core::WaypointConfig;

use crate::binding::resolve_bindings;
use crate::constraints::check_constraints;
use crate::descriptor::{build_descriptor, EndpointDescriptor};
use crate::duplicates::detect_duplicate_routes;
use crate::model::attributes::{recognize, RecognizedAttribute};
use crate::model::{HandlerModel, HttpVerb, ResolutionContext, SymbolId, SymbolResolver};
use crate::outcomes::{infer_outcomes, ErrorOutcome};
use crate::routes::parse_route_pattern;

/// Counters for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub handlers: usize,
    pub descriptors: usize,
    pub diagnostics: usize,
    pub cache_hits: usize,
    pub duration_ms: u64,
}

/// The complete, immutable result of one analysis run.
#[derive(Debug)]
pub struct AnalysisRun {
    pub descriptors: Vec<EndpointDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AnalysisStats,
}

/// Cached per-handler inference result. Diagnostics are replayed on every
/// hit so a cache hit and a cold run produce identical output.
struct CachedInference {
    outcomes: Vec<ErrorOutcome>,
    diagnostics: Vec<Diagnostic>,
}

struct HandlerOutput {
    descriptors: Vec<EndpointDescriptor>,
    sink: DiagnosticSink,
    cache_hit: bool,
}

/// The pipeline itself. Holds the config and the inference boundary cache;
/// everything per-run (resolution context, sinks, results) is rebuilt from
/// scratch on each call.
pub struct AnalysisPipeline {
    config: WaypointConfig,
    cache: Cache<InferenceKey, Arc<CachedInference>>,
    pool: Option<rayon::ThreadPool>,
}

/// Cache key for the inference boundary. Declared outcomes are part of the
/// key because they decide whether undocumented interface calls are
/// diagnosed; the same body with a new declaration must re-infer.
type InferenceKey = (SymbolId, u64, Vec<ErrorOutcome>);

impl AnalysisPipeline {
    pub fn new(config: WaypointConfig) -> Self {
        let cache = Cache::new(config.analysis.effective_cache_capacity());
        let pool = config.analysis.threads.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .ok()
        });
        Self { config, cache, pool }
    }

    pub fn with_defaults() -> Self {
        Self::new(WaypointConfig::default())
    }

    /// Analyze every candidate handler and run the barrier passes.
    ///
    /// Cancellation aborts the whole run; partial results are never
    /// returned, so a stale run can be discarded wholesale.
    pub fn run<R>(
        &self,
        handlers: &[HandlerModel],
        resolver: &R,
        cancel: &CancellationToken,
    ) -> Result<AnalysisRun, AnalysisError>
    where
        R: SymbolResolver + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| self.run_inner(handlers, resolver, cancel)),
            None => self.run_inner(handlers, resolver, cancel),
        }
    }

    fn run_inner<R>(
        &self,
        handlers: &[HandlerModel],
        resolver: &R,
        cancel: &CancellationToken,
    ) -> Result<AnalysisRun, AnalysisError>
    where
        R: SymbolResolver + Sync,
    {
        let started = Instant::now();
        let ctx = ResolutionContext::new();
        info!(handlers = handlers.len(), "analysis run started");

        // Map phase: embarrassingly parallel, ordered collect.
        let outputs: Result<Vec<HandlerOutput>, AnalysisError> = handlers
            .par_iter()
            .map(|handler| self.analyze_handler(&ctx, resolver, handler, cancel))
            .collect();
        let outputs = outputs?;

        let mut sink = DiagnosticSink::new();
        let mut descriptors = Vec::new();
        let mut cache_hits = 0usize;
        for output in outputs {
            sink.merge(output.sink);
            descriptors.extend(output.descriptors);
            cache_hits += usize::from(output.cache_hit);
        }

        // Barrier: cross-handler checks need the complete descriptor set.
        detect_duplicate_routes(&descriptors, &mut sink);

        let stats = AnalysisStats {
            handlers: handlers.len(),
            descriptors: descriptors.len(),
            diagnostics: sink.len(),
            cache_hits,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            descriptors = stats.descriptors,
            diagnostics = stats.diagnostics,
            cache_hits = stats.cache_hits,
            duration_ms = stats.duration_ms,
            "analysis run complete"
        );

        Ok(AnalysisRun { descriptors, diagnostics: sink.into_vec(), stats })
    }

    fn analyze_handler(
        &self,
        ctx: &ResolutionContext,
        resolver: &dyn SymbolResolver,
        handler: &HandlerModel,
        cancel: &CancellationToken,
    ) -> Result<HandlerOutput, AnalysisError> {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let (verbs, declared, accepted) = recognize_handler_attributes(handler);
        if verbs.is_empty() {
            return Ok(HandlerOutput {
                descriptors: Vec::new(),
                sink: DiagnosticSink::new(),
                cache_hit: false,
            });
        }

        // Outcomes are route- and verb-independent: computed once per
        // handler, shared read-only across all its attributes.
        let (outcomes, infer_diags, cache_hit) =
            self.infer_with_cache(ctx, resolver, handler, &declared, cancel)?;

        let mut sink = DiagnosticSink::new();
        for diagnostic in infer_diags {
            sink.push(diagnostic);
        }
        let inference_errors = sink.error_count();

        let mut descriptors = Vec::with_capacity(verbs.len());
        for (verb, pattern_text, location) in verbs {
            let checkpoint = sink.error_count();
            let Some(route) = parse_route_pattern(&pattern_text, &location, &mut sink) else {
                continue;
            };
            let bindings = resolve_bindings(ctx, resolver, handler, verb, &route, &mut sink);
            check_constraints(ctx, &route, &bindings, &location, &mut sink);

            // Warning/Info never block; any Error in this attribute's scope
            // (or from inference) does.
            if sink.error_count() == checkpoint && inference_errors == 0 {
                descriptors.push(build_descriptor(
                    handler, verb, route, bindings, &outcomes, &declared, accepted,
                ));
            } else {
                debug!(handler = %handler.name, verb = %verb, "descriptor suppressed by errors");
            }
        }

        Ok(HandlerOutput { descriptors, sink, cache_hit })
    }

    fn infer_with_cache(
        &self,
        ctx: &ResolutionContext,
        resolver: &dyn SymbolResolver,
        handler: &HandlerModel,
        declared: &[ErrorOutcome],
        cancel: &CancellationToken,
    ) -> Result<(Vec<ErrorOutcome>, Vec<Diagnostic>, bool), AnalysisError> {
        let key = (handler.id, handler.fingerprint, declared.to_vec());
        if let Some(cached) = self.cache.get(&key) {
            return Ok((cached.outcomes.clone(), cached.diagnostics.clone(), true));
        }

        let mut infer_sink = DiagnosticSink::new();
        let outcomes = infer_outcomes(
            ctx,
            resolver,
            handler,
            declared,
            cancel,
            self.config.analysis.effective_max_scan_depth(),
            &mut infer_sink,
        )?;
        let diagnostics = infer_sink.into_vec();
        self.cache.insert(
            key,
            Arc::new(CachedInference {
                outcomes: outcomes.clone(),
                diagnostics: diagnostics.clone(),
            }),
        );
        Ok((outcomes, diagnostics, false))
    }
}

/// Pull the recognized pieces out of a handler's attribute list: verb
/// attributes in declaration order, declared outcomes, the accepted flag.
fn recognize_handler_attributes(
    handler: &HandlerModel,
) -> (Vec<(HttpVerb, String, SourceLocation)>, Vec<ErrorOutcome>, bool) {
    let mut verbs = Vec::new();
    let mut declared = Vec::new();
    let mut accepted = false;
    for attr in &handler.attributes {
        match recognize(attr) {
            Some(RecognizedAttribute::Verb { verb, pattern }) => {
                verbs.push((verb, pattern, attr.location.clone()));
            }
            Some(RecognizedAttribute::DeclaredOutcome(outcome)) => declared.push(outcome),
            Some(RecognizedAttribute::AcceptedResponse) => accepted = true,
            _ => {}
        }
    }
    (verbs, declared, accepted)
}

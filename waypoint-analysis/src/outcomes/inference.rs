//! The symbolic outcome scan.
//!
//! A worklist of body-owning symbols is drained while a visited set keyed by
//! stable symbol identity cuts cycles: the set only grows and same-unit
//! symbols are finite, so termination is guaranteed regardless of the shape
//! of the reference graph. The scan is pure; identical input yields an
//! identical, order-stable outcome set.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;
use waypoint_core::cancel::Cancellable;
use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink};
use waypoint_core::errors::AnalysisError;
use waypoint_core::types::collections::FxHashSet;

use crate::model::{
    Body, CallExpr, ConstValue, Expr, HandlerModel, ResolutionContext, SymbolId, SymbolInfo,
    SymbolResolver,
};

use super::factory::FactoryMember;
use super::types::ErrorOutcome;

/// Compute every structured failure outcome reachable from a handler body.
///
/// `declared` is the handler's own explicit outcome declarations; they are
/// not copied into the result (the descriptor builder merges them) but their
/// presence decides whether undocumented interface calls are tolerated.
pub fn infer_outcomes(
    ctx: &ResolutionContext,
    resolver: &dyn SymbolResolver,
    handler: &HandlerModel,
    declared: &[ErrorOutcome],
    cancel: &dyn Cancellable,
    max_visited: usize,
    sink: &mut DiagnosticSink,
) -> Result<Vec<ErrorOutcome>, AnalysisError> {
    let handler_documented = !declared.is_empty();
    let mut outcomes: BTreeSet<ErrorOutcome> = BTreeSet::new();
    let mut visited: FxHashSet<SymbolId> = FxHashSet::default();
    let mut worklist: VecDeque<SymbolId> = VecDeque::new();

    visited.insert(handler.id);
    worklist.push_back(handler.id);

    while let Some(symbol) = worklist.pop_front() {
        let Some(body) = resolver.body(symbol) else {
            continue;
        };
        for expr in body.walk() {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            match expr {
                Expr::Call(call) => scan_call(
                    ctx,
                    resolver,
                    handler_documented,
                    call,
                    &mut outcomes,
                    &mut visited,
                    &mut worklist,
                    sink,
                ),
                Expr::Symbol(id, _) => {
                    enqueue_same_unit(resolver, *id, &mut visited, &mut worklist);
                }
                Expr::Int(_) | Expr::Str(_) | Expr::Seq(_) => {}
            }
            if visited.len() > max_visited {
                sink.report(
                    DiagnosticCode::InferScanBudgetExceeded,
                    handler.location.clone(),
                    [handler.name.clone(), max_visited.to_string()],
                );
                return Ok(outcomes.into_iter().collect());
            }
        }
    }

    debug!(
        handler = %handler.name,
        visited = visited.len(),
        outcomes = outcomes.len(),
        "outcome scan complete"
    );
    Ok(outcomes.into_iter().collect())
}

#[allow(clippy::too_many_arguments)]
fn scan_call(
    ctx: &ResolutionContext,
    resolver: &dyn SymbolResolver,
    handler_documented: bool,
    call: &CallExpr,
    outcomes: &mut BTreeSet<ErrorOutcome>,
    visited: &mut FxHashSet<SymbolId>,
    worklist: &mut VecDeque<SymbolId>,
    sink: &mut DiagnosticSink,
) {
    let Some(info) = resolver.symbol(call.callee) else {
        return;
    };

    // (a) and (d): members of the error-factory type.
    if let Some(declaring) = info.declaring_type.as_deref() {
        if ctx.factory.is_factory_type(declaring) {
            match ctx.factory.classify(&info.name) {
                FactoryMember::Known(kind) => {
                    outcomes.insert(ErrorOutcome::Known(kind));
                }
                FactoryMember::Custom => {
                    fold_custom(resolver, call, outcomes, sink);
                }
                FactoryMember::Unknown => {
                    sink.report(
                        DiagnosticCode::InferUnknownErrorFactory,
                        call.location.clone(),
                        [info.name.as_str()],
                    );
                }
            }
            return;
        }
    }

    // (b): bodiless member returning the result union.
    if info.returns_result_union && !info.has_body {
        if !info.declared_outcomes.is_empty() {
            // Terminal: absorb the declaration, never recurse past it.
            outcomes.extend(info.declared_outcomes.iter().cloned());
        } else if !handler_documented {
            // Assuming "no errors" would make generated documentation lie;
            // that is treated as worse than a failed build.
            sink.report(
                DiagnosticCode::InferUndocumentedInterfaceCall,
                call.location.clone(),
                [qualified_name(info)],
            );
        }
        return;
    }

    // (c): same-unit declaration with a body.
    enqueue_same_unit(resolver, call.callee, visited, worklist);
}

/// Push a not-yet-visited same-unit symbol onto the worklist.
fn enqueue_same_unit(
    resolver: &dyn SymbolResolver,
    id: SymbolId,
    visited: &mut FxHashSet<SymbolId>,
    worklist: &mut VecDeque<SymbolId>,
) {
    let Some(info) = resolver.symbol(id) else {
        return;
    };
    if info.same_unit && info.has_body && visited.insert(id) {
        worklist.push_back(id);
    }
}

/// Constant-fold `Custom(code, identifier)`. Literals fold directly;
/// same-unit consts fold through their declared value. Anything else is a
/// soft diagnostic, never a failure.
fn fold_custom(
    resolver: &dyn SymbolResolver,
    call: &CallExpr,
    outcomes: &mut BTreeSet<ErrorOutcome>,
    sink: &mut DiagnosticSink,
) {
    let code = call.args.first().and_then(|e| fold_int(resolver, e));
    let identifier = call.args.get(1).and_then(|e| fold_str(resolver, e));

    match (code, identifier) {
        (Some(code), Some(identifier)) => {
            outcomes.insert(ErrorOutcome::Custom { code, identifier });
        }
        _ => {
            sink.report(
                DiagnosticCode::InferUnfoldableCustomOutcome,
                call.location.clone(),
                std::iter::empty::<&str>(),
            );
        }
    }
}

fn fold_int(resolver: &dyn SymbolResolver, expr: &Expr) -> Option<u16> {
    let value = match expr {
        Expr::Int(v) => *v,
        Expr::Symbol(id, _) => match resolver.symbol(*id)?.const_value.as_ref()? {
            ConstValue::Int(v) => *v,
            ConstValue::Str(_) => return None,
        },
        _ => return None,
    };
    u16::try_from(value).ok()
}

fn fold_str(resolver: &dyn SymbolResolver, expr: &Expr) -> Option<String> {
    match expr {
        Expr::Str(s) => Some(s.clone()),
        Expr::Symbol(id, _) => match resolver.symbol(*id)?.const_value.as_ref()? {
            ConstValue::Str(s) => Some(s.clone()),
            ConstValue::Int(_) => None,
        },
        _ => None,
    }
}

fn qualified_name(info: &SymbolInfo) -> String {
    match info.declaring_type.as_deref() {
        Some(declaring) => format!("{declaring}.{}", info.name),
        None => info.name.clone(),
    }
}

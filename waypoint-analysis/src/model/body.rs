//! Handler body representation.
//!
//! The host compiler lowers a body to an ordered expression tree that keeps
//! only what inference needs: invocations with resolved callees, references
//! to other declarations, literals, and structural nesting.

use waypoint_core::diagnostics::SourceLocation;

use super::types::SymbolId;

/// An invocation with its callee already resolved to a symbol.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: SymbolId,
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

/// A body-reachable expression.
#[derive(Debug, Clone)]
pub enum Expr {
    Call(CallExpr),
    /// Reference to another declaration (property, field, local, method group).
    Symbol(SymbolId, SourceLocation),
    Int(i64),
    Str(String),
    /// Any structural grouping: blocks, conditions, argument tuples.
    Seq(Vec<Expr>),
}

impl Expr {
    /// Iterate this expression and all descendants, pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// The lowered body of one declaration.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub exprs: Vec<Expr>,
}

impl Body {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self { exprs }
    }

    /// Iterate every expression in the body, pre-order.
    pub fn walk(&self) -> Walk<'_> {
        // Reverse so iteration yields exprs in declaration order.
        Walk {
            stack: self.exprs.iter().rev().collect(),
        }
    }
}

/// Pre-order traversal over an expression tree.
pub struct Walk<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        match expr {
            Expr::Call(call) => self.stack.extend(call.args.iter().rev()),
            Expr::Seq(children) => self.stack.extend(children.iter().rev()),
            Expr::Symbol(..) | Expr::Int(_) | Expr::Str(_) => {}
        }
        Some(expr)
    }
}

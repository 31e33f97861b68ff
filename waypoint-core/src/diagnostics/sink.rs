//! Diagnostic values and the append-only sink.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::code::{DiagnosticCode, Severity};

/// A source location as reported by the host compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self { file: file.into(), line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One structured diagnostic. Message arguments are kept positional so the
/// emitter can re-render them; `message()` applies the code's template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub location: SourceLocation,
    pub args: SmallVec<[String; 4]>,
}

impl Diagnostic {
    pub fn new<I, S>(code: DiagnosticCode, location: SourceLocation, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            location,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Severity, fixed by the code.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Render the code's message template with this diagnostic's arguments.
    pub fn message(&self) -> String {
        let mut out = self.code.template().to_string();
        for (i, arg) in self.args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        // Escaped literal braces in templates render as single braces.
        out.replace("{{", "{").replace("}}", "}")
    }
}

/// Append-only diagnostic collector.
///
/// Each map-phase worker owns its own sink; sinks are merged in handler order
/// so output order is deterministic. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    items: Vec<Diagnostic>,
    errors: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity() == Severity::Error {
            self.errors += 1;
        }
        self.items.push(diagnostic);
    }

    /// Append with code, location, and positional args in one call.
    pub fn report<I, S>(&mut self, code: DiagnosticCode, location: SourceLocation, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Diagnostic::new(code, location, args));
    }

    /// Absorb another sink, preserving its order.
    pub fn merge(&mut self, other: DiagnosticSink) {
        self.errors += other.errors;
        self.items.extend(other.items);
    }

    /// Current Error-severity count; used as a checkpoint by the descriptor
    /// builder to decide whether an attribute scope stayed fatal-free.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Finish collection, yielding the ordered diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

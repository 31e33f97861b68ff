//! Structured diagnostics: stable codes, fixed severities, append-only sink.

pub mod code;
pub mod sink;

pub use code::{DiagnosticCode, Severity};
pub use sink::{Diagnostic, DiagnosticSink, SourceLocation};

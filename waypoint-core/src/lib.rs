//! Core types, traits, errors, config, and diagnostics for the Waypoint
//! endpoint analysis engine.
//!
//! This crate carries everything the analysis pipeline needs but that is not
//! itself analysis: the stable diagnostic enumeration, subsystem error enums,
//! layered configuration, cooperative cancellation, and tracing setup.

pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod trace;
pub mod types;

pub use cancel::{Cancellable, CancellationToken};
pub use config::WaypointConfig;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity, SourceLocation};
pub use errors::{AnalysisError, ConfigError};

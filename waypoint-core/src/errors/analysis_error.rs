//! Analysis pipeline errors.

use super::error_code::{self, WaypointErrorCode};

/// Errors that abort an analysis run.
///
/// Malformed input never lands here; it becomes diagnostics and the affected
/// handler is skipped. Only cancellation aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis cancelled")]
    Cancelled,
}

impl WaypointErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

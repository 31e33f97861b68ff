//! Stable machine-readable error codes.
//!
//! Codes are part of the external surface consumed by host tooling; changing
//! one is a breaking change and must be tracked.

pub const CONFIG_ERROR: &str = "WAY-E-CONFIG";
pub const CANCELLED: &str = "WAY-E-CANCELLED";

/// Implemented by every subsystem error enum.
pub trait WaypointErrorCode {
    /// The stable code for this error.
    fn error_code(&self) -> &'static str;
}

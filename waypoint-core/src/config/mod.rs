//! Configuration subsystem.

pub mod analysis_config;
pub mod waypoint_config;

pub use analysis_config::AnalysisConfig;
pub use waypoint_config::WaypointConfig;

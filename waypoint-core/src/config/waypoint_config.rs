//! Top-level Waypoint configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`WAYPOINT_*`)
/// 2. Project config (`waypoint.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaypointConfig {
    pub analysis: AnalysisConfig,
}

impl WaypointConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("waypoint.toml");
        if project_config_path.exists() {
            let text = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::ReadError {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(config: &mut Self) {
        if let Some(v) = env_usize("WAYPOINT_MAX_SCAN_DEPTH") {
            config.analysis.max_scan_depth = Some(v);
        }
        if let Some(v) = env_usize("WAYPOINT_THREADS") {
            config.analysis.threads = Some(v);
        }
        if let Some(v) = env_u64("WAYPOINT_CACHE_CAPACITY") {
            config.analysis.cache_capacity = Some(v);
        }
    }

    fn validate(config: &Self) -> Result<(), ConfigError> {
        if config.analysis.effective_max_scan_depth() == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_scan_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok()?.parse().ok()
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}

//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Safety valve on the per-handler symbol scan: maximum number of
    /// same-unit declarations visited before the scan aborts. Default: 128.
    pub max_scan_depth: Option<usize>,
    /// Worker threads for the map phase. Default: rayon's global pool size.
    pub threads: Option<usize>,
    /// Capacity of the per-handler inference cache. Default: 4096.
    pub cache_capacity: Option<u64>,
}

impl AnalysisConfig {
    /// Effective scan budget, defaulting to 128 visited declarations.
    pub fn effective_max_scan_depth(&self) -> usize {
        self.max_scan_depth.unwrap_or(128)
    }

    /// Effective cache capacity, defaulting to 4096 entries.
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(4096)
    }
}

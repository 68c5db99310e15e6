//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{CAPACITY_FAILURE_GATE_THRESHOLD, DEFAULT_MAX_BATCH_SIZE};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub resolution: ResolutionConfig,
    pub capacity: CapacityPlannerConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Resolution batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Soft cap on requests resolved per run; larger batches are chunked.
    pub max_batch_size: usize,
}

/// Capacity planner client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityPlannerConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub bearer_token: Option<String>,
    #[serde(default, skip_serializing)]
    pub partner_key: Option<String>,
    pub timeout_seconds: u64,
    /// Consecutive failures within a run before the client stops calling out.
    pub failure_gate_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "dueline.db".to_string(),
                pool_size: 8,
            },
            resolution: ResolutionConfig {
                max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            },
            capacity: CapacityPlannerConfig {
                base_url: "http://localhost:3000".to_string(),
                bearer_token: None,
                partner_key: None,
                timeout_seconds: 10,
                failure_gate_threshold: CAPACITY_FAILURE_GATE_THRESHOLD,
            },
        }
    }
}

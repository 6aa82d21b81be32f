//! Bridge configuration
//!
//! Per-scope knobs the host loads alongside its own configuration.
//! Inspection is off by default; a scope opts in explicitly.

use serde::Deserialize;

/// Bridge configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Whether inspection runs for this configuration scope.
    pub enabled: bool,

    /// Number of blocking-capable pool threads.
    pub pool_threads: usize,

    /// Bounded depth of the pool's task queue. Submissions beyond this
    /// are rejected rather than queued without limit.
    pub queue_depth: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            pool_threads: 4,
            queue_depth: 64,
        }
    }
}

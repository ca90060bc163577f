pub mod http;
pub mod orchestrator;
pub mod reachability;
pub mod rtsp;

use serde::{Deserialize, Serialize};

use crate::credentials::Credential;

/// Probe timing, port, and concurrency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Deadline for a single reachability check
    pub reachability_timeout_ms: u64,
    /// Per-request deadline for HTTP probes
    pub http_timeout_ms: u64,
    /// Connect and read deadline for RTSP handshakes
    pub rtsp_timeout_ms: u64,
    pub http_port: u16,
    pub rtsp_port: u16,
    /// Cap on simultaneous probes against one device
    pub max_target_probes: usize,
    /// Cap on total in-flight probes for the process
    pub max_total_probes: usize,
    /// Self-throttle between consecutive probed targets
    pub pacing_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            reachability_timeout_ms: 1000,
            http_timeout_ms: 5000,
            rtsp_timeout_ms: 5000,
            http_port: 80,
            rtsp_port: 554,
            max_target_probes: 16,
            max_total_probes: 64,
            pacing_ms: 1000,
        }
    }
}

/// One confirmed (URL, credential) combination on a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessfulConnection {
    pub url: String,
    /// None for surfaces that answered without authentication
    pub credential: Option<Credential>,
}

/// Why a target produced no results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownVendor,
    Unreachable,
}

/// Outcome of driving one target through the probe pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutcome {
    Skipped(SkipReason),
    ResultsCollected(Vec<SuccessfulConnection>),
}

/// Aggregate counters for a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Inventory records that carried a valid address
    pub targets_found: u32,
    /// Of those, how many had a vendor the registry knows
    pub known_vendor_targets: u32,
    /// Raw inventory rows behind the run, for the report trailer
    pub candidate_lines: u32,
    pub started_at: i64,
    pub finished_at: i64,
}

/// Everything the reporting layer needs about a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub connections: Vec<SuccessfulConnection>,
    pub stats: RunStats,
}

//! Per-target probe driving. Gates on the vendor registry, checks transport
//! reachability, fans out to the HTTP and RTSP executors, and paces between
//! targets.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use super::http::HttpProber;
use super::reachability::is_port_open;
use super::rtsp::RtspProber;
use super::{ProbeConfig, RunReport, RunStats, SkipReason, TargetOutcome};
use crate::credentials::CredentialStore;
use crate::inventory::Target;
use crate::vendors::VendorRegistry;

pub struct TargetOrchestrator {
    config: ProbeConfig,
    registry: VendorRegistry,
    store: CredentialStore,
    global_slots: Arc<Semaphore>,
}

impl TargetOrchestrator {
    pub fn new(config: ProbeConfig, registry: VendorRegistry, store: CredentialStore) -> Self {
        let global_slots = Arc::new(Semaphore::new(config.max_total_probes));
        Self {
            config,
            registry,
            store,
            global_slots,
        }
    }

    /// Process targets strictly in arrival order, one at a time, sleeping the
    /// pacing delay after each target that reached the probing stage.
    pub async fn run(&self, targets: &[Target], candidate_lines: u32) -> RunReport {
        let started_at = Utc::now().timestamp();
        let mut connections = Vec::new();
        let mut known_vendor_targets = 0u32;

        for target in targets {
            match self.probe_target(target).await {
                TargetOutcome::Skipped(SkipReason::UnknownVendor) => {
                    println!(
                        "Unknown vendor '{}' for {}, skipping",
                        target.vendor, target.address
                    );
                    continue;
                }
                TargetOutcome::Skipped(SkipReason::Unreachable) => {
                    known_vendor_targets += 1;
                    println!(
                        "{} not reachable on ports {} and {}, skipping",
                        target.address, self.config.http_port, self.config.rtsp_port
                    );
                }
                TargetOutcome::ResultsCollected(found) => {
                    known_vendor_targets += 1;
                    println!(
                        "{} ({}): {} working surface(s)",
                        target.address,
                        target.vendor,
                        found.len()
                    );
                    connections.extend(found);
                }
            }
            sleep(Duration::from_millis(self.config.pacing_ms)).await;
        }

        RunReport {
            connections,
            stats: RunStats {
                targets_found: targets.len() as u32,
                known_vendor_targets,
                candidate_lines,
                started_at,
                finished_at: Utc::now().timestamp(),
            },
        }
    }

    /// Drive one target through the pipeline: vendor gate, concurrent
    /// reachability checks, then both executors concurrently. The RTSP
    /// result, if any, is merged ahead of the HTTP results.
    pub async fn probe_target(&self, target: &Target) -> TargetOutcome {
        // Unknown vendors are skipped before any network activity
        if !self.registry.contains(&target.vendor) {
            return TargetOutcome::Skipped(SkipReason::UnknownVendor);
        }

        let wait = Duration::from_millis(self.config.reachability_timeout_ms);
        let (http_open, rtsp_open) = tokio::join!(
            is_port_open(target.address, self.config.http_port, wait),
            is_port_open(target.address, self.config.rtsp_port, wait),
        );
        if !http_open && !rtsp_open {
            return TargetOutcome::Skipped(SkipReason::Unreachable);
        }

        let http_templates: &[String] = if http_open {
            self.registry.http_templates(&target.vendor)
        } else {
            &[]
        };
        let rtsp_templates: &[String] = if rtsp_open {
            self.registry.rtsp_templates(&target.vendor)
        } else {
            &[]
        };

        let http_task = async {
            if http_templates.is_empty() {
                return Vec::new();
            }
            // One session context per target, shared across its matrix tasks.
            // Probes must reach the device directly, not an env-configured proxy.
            match Client::builder()
                .timeout(Duration::from_millis(self.config.http_timeout_ms))
                .no_proxy()
                .build()
            {
                Ok(client) => {
                    let prober = HttpProber::new(
                        client,
                        self.config.http_port,
                        self.config.max_target_probes,
                        self.global_slots.clone(),
                    );
                    prober
                        .probe_matrix(target.address, http_templates, &self.store)
                        .await
                }
                Err(e) => {
                    eprintln!("Failed to build HTTP client for {}: {e}", target.address);
                    Vec::new()
                }
            }
        };

        let rtsp_wait = Duration::from_millis(self.config.rtsp_timeout_ms);
        let rtsp_task = async {
            if rtsp_templates.is_empty() {
                return None;
            }
            RtspProber::new(rtsp_wait, rtsp_wait)
                .probe_streams(target.address, rtsp_templates)
                .await
        };

        let (rtsp_hit, http_hits) = tokio::join!(rtsp_task, http_task);

        let mut connections = Vec::new();
        connections.extend(rtsp_hit);
        connections.extend(http_hits);
        TargetOutcome::ResultsCollected(connections)
    }
}

mod credentials;
mod inventory;
mod probe;
mod report;
#[cfg(test)]
mod test_utils;
mod vendors;

use std::path::PathBuf;

use clap::Parser;
use tokio::io;

use credentials::CredentialStore;
use probe::ProbeConfig;
use probe::orchestrator::TargetOrchestrator;
use vendors::VendorRegistry;

#[derive(Parser)]
#[command(name = "rust_camera_audit_tool")]
#[command(about = "Probe inventoried camera targets for default-credential exposure")]
struct Cli {
    /// Search query passed to the external inventory tool
    #[arg(long, default_value = "app:trendnet +after:'2024-01-01' +before:'2025-01-01'")]
    query: String,

    /// Inventory command, invoked as `<command> search <query>`
    #[arg(long, default_value = "zoomeye")]
    inventory_cmd: String,

    /// Parse a saved inventory listing instead of invoking the search tool
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Reachability check timeout in milliseconds
    #[arg(long, default_value = "1000")]
    timeout_ms: u64,

    /// Per-request HTTP deadline in milliseconds
    #[arg(long, default_value = "5000")]
    http_timeout_ms: u64,

    /// RTSP connect/read deadline in milliseconds
    #[arg(long, default_value = "5000")]
    rtsp_timeout_ms: u64,

    /// HTTP port checked on each target
    #[arg(long, default_value = "80")]
    http_port: u16,

    /// RTSP port checked on each target
    #[arg(long, default_value = "554")]
    rtsp_port: u16,

    /// Cap on simultaneous probes against a single target
    #[arg(long, default_value = "16")]
    max_target_probes: usize,

    /// Cap on total in-flight probes
    #[arg(long, default_value = "64")]
    max_total_probes: usize,

    /// Delay between consecutive targets in milliseconds
    #[arg(long, default_value = "1000")]
    pacing_ms: u64,

    /// Print the run report as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let listing = match &cli.input_file {
        Some(path) => inventory::read_listing(path).await?,
        None => inventory::run_search(&cli.inventory_cmd, &cli.query).await?,
    };
    let inventory = inventory::parse_listing(&listing);
    println!(
        "Inventory returned {} probe candidate(s)",
        inventory.targets.len()
    );

    let config = ProbeConfig {
        reachability_timeout_ms: cli.timeout_ms,
        http_timeout_ms: cli.http_timeout_ms,
        rtsp_timeout_ms: cli.rtsp_timeout_ms,
        http_port: cli.http_port,
        rtsp_port: cli.rtsp_port,
        max_target_probes: cli.max_target_probes,
        max_total_probes: cli.max_total_probes,
        pacing_ms: cli.pacing_ms,
    };
    let orchestrator =
        TargetOrchestrator::new(config, VendorRegistry::new(), CredentialStore::default());

    let run_report = orchestrator
        .run(&inventory.targets, inventory.candidate_lines)
        .await;

    if cli.json {
        report::print_json(&run_report).map_err(io::Error::other)?;
    } else {
        report::print_plain(&run_report);
    }

    Ok(())
}

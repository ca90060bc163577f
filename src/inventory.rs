//! Inventory collaborator. Invokes the external search tool and extracts
//! (address, vendor) probe candidates from its line-oriented output.

use std::net::Ipv4Addr;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tokio::io;
use tokio::process::Command;

lazy_static! {
    /// Column layout of a search result row: ip:port, service, country, app
    static ref RECORD: Regex = Regex::new(
        r"^(?P<ip>[\d\.]+):(?P<port>\d+)\s+(?P<service>\S+)\s+(?P<country>.+?)\s+(?P<app>.+?)\s+"
    )
    .unwrap();
}

/// One probe candidate from the inventory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub address: Ipv4Addr,
    pub vendor: String,
}

/// Parsed inventory output: the valid targets plus the raw candidate row
/// count used in the report trailer
#[derive(Debug, Clone)]
pub struct InventoryListing {
    pub targets: Vec<Target>,
    pub candidate_lines: u32,
}

/// Run the external inventory tool (called as `<command> search <query>`) and
/// capture its stdout. A command that cannot be launched aborts the run; a
/// nonzero exit is reported but the captured output is still parsed.
pub async fn run_search(command: &str, query: &str) -> io::Result<String> {
    let output = Command::new(command).args(["search", query]).output().await?;

    if !output.status.success() {
        eprintln!(
            "Inventory command exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Read a saved inventory listing instead of invoking the search tool
pub async fn read_listing(path: &Path) -> io::Result<String> {
    tokio::fs::read_to_string(path).await
}

/// Extract targets from raw listing text. Header and non-record lines are
/// skipped; records whose address is not a valid IPv4 literal are dropped
/// here so nothing downstream ever touches the network for them.
pub fn parse_listing(listing: &str) -> InventoryListing {
    let mut targets = Vec::new();

    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() || !line.contains(':') || line.starts_with("ip:port") {
            continue;
        }
        let Some(record) = RECORD.captures(line) else {
            continue;
        };

        let address_text = &record["ip"];
        let vendor = record["app"].trim().to_lowercase();

        match address_text.parse::<Ipv4Addr>() {
            Ok(address) => targets.push(Target { address, vendor }),
            Err(_) => eprintln!("Dropping record with invalid address: {address_text}"),
        }
    }

    let candidate_lines = (listing.lines().count() as u32).saturating_sub(1);

    InventoryListing {
        targets,
        candidate_lines,
    }
}

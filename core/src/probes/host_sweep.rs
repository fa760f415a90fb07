//! Host-discovery sweep via `nmap -sn`.
//!
//! Last resort for bulk discovery. Without privileges nmap falls back to TCP
//! connect pings and cannot see hardware addresses, so records may come back
//! without a MAC.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use devscout_common::device::RawRecord;
use devscout_common::network::mac;
use devscout_common::network::range::NetworkRange;

use super::{ProbeResult, ProbeSource, command};

const PROGRAM: &str = "nmap";
const REPORT_PREFIX: &str = "Nmap scan report for ";
const MAC_PREFIX: &str = "MAC Address: ";

pub struct HostSweep {
    timeout: Duration,
}

impl HostSweep {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeSource for HostSweep {
    fn name(&self) -> &'static str {
        "nmap-sweep"
    }

    fn is_available(&self) -> bool {
        command::on_path(PROGRAM)
    }

    async fn discover(&self, range: NetworkRange) -> ProbeResult<Vec<RawRecord>> {
        let target = range.to_string();
        debug!("sweeping {target} with {PROGRAM}");
        let text = command::stdout(PROGRAM, &["-sn", "-n", "-T4", target.as_str()], self.timeout).await?;
        Ok(parse_nmap_sweep(&text))
    }
}

/// Parses normal `nmap -sn` output.
///
/// ```text
/// Nmap scan report for 192.168.1.1
/// Host is up (0.0021s latency).
/// MAC Address: 00:11:22:33:44:55 (Vendor)
/// Nmap scan report for router.lan (192.168.1.2)
/// ```
pub fn parse_nmap_sweep(text: &str) -> Vec<RawRecord> {
    let mut records: Vec<RawRecord> = Vec::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(REPORT_PREFIX) {
            if let Some(ip) = report_address(rest) {
                records.push(RawRecord::new(ip));
            }
        } else if let Some(rest) = line.strip_prefix(MAC_PREFIX)
            && let Some(last) = records.last_mut()
            && last.mac.is_none()
        {
            last.mac = rest.split_whitespace().next().and_then(mac::parse_mac);
        }
    }

    records
}

fn report_address(rest: &str) -> Option<Ipv4Addr> {
    let rest = rest.trim();
    match (rest.rfind('('), rest.rfind(')')) {
        (Some(open), Some(close)) if open < close => rest[open + 1..close].parse().ok(),
        _ => rest.parse().ok(),
    }
}

//! Active **ARP sweep** via `arp-scan`.
//!
//! The most accurate source: every host on the segment must answer ARP,
//! firewall or not. It needs raw sockets, so it is only offered when the
//! process runs privileged.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use devscout_common::device::RawRecord;
use devscout_common::network::mac;
use devscout_common::network::range::NetworkRange;

use super::{ProbeResult, ProbeSource, command};

const PROGRAM: &str = "arp-scan";

pub struct ArpSweep {
    timeout: Duration,
}

impl ArpSweep {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeSource for ArpSweep {
    fn name(&self) -> &'static str {
        PROGRAM
    }

    fn is_available(&self) -> bool {
        command::on_path(PROGRAM) && is_root::is_root()
    }

    async fn discover(&self, range: NetworkRange) -> ProbeResult<Vec<RawRecord>> {
        let target = range.to_string();
        debug!("sweeping {target} with {PROGRAM}");
        let text = command::stdout(
            PROGRAM,
            &["--quiet", "--retry=2", "--ignoredups", target.as_str()],
            self.timeout,
        )
        .await?;
        Ok(parse_arp_scan(&text, range))
    }
}

/// Parses `arp-scan --quiet` output, ignoring the banner lines.
///
/// ```text
/// Interface: eth0, type: EN10MB, MAC: dc:a6:32:00:00:01, IPv4: 192.168.1.10
/// Starting arp-scan 1.10.0 with 256 hosts (https://github.com/royhills/arp-scan)
/// 192.168.1.1     00:11:22:33:44:55
/// 192.168.1.42    b8:27:eb:11:22:33
/// ```
pub fn parse_arp_scan(text: &str, range: NetworkRange) -> Vec<RawRecord> {
    text.lines()
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let ip = cols.next()?.parse().ok()?;
            let hw = mac::parse_mac(cols.next()?)?;
            range
                .contains(ip)
                .then(|| RawRecord::new(ip).with_mac(hw))
        })
        .collect()
}

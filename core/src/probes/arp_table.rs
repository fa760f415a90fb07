//! The kernel's **neighbour cache**.
//!
//! Always readable without privileges, but it only knows hosts this machine
//! has already talked to. On Linux the table is read straight from
//! `/proc/net/arp`; elsewhere (and as a Linux fallback) `arp -a` is parsed.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use tracing::debug;

use devscout_common::device::RawRecord;
use devscout_common::network::mac;
use devscout_common::network::range::NetworkRange;

use super::{NeighborLookup, ProbeError, ProbeResult, ProbeSource, command};

const PROC_ARP: &str = "/proc/net/arp";
const ATF_COM: u32 = 0x2;

pub struct ArpTable {
    timeout: Duration,
}

impl ArpTable {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn read_table(&self) -> ProbeResult<Vec<RawRecord>> {
        if cfg!(target_os = "linux") {
            match tokio::fs::read_to_string(PROC_ARP).await {
                Ok(text) => return Ok(parse_proc_arp(&text)),
                Err(e) => debug!("{PROC_ARP} unreadable ({e}), falling back to arp -a"),
            }
        }
        let text = command::stdout("arp", &["-a"], self.timeout).await?;
        Ok(parse_arp_a(&text))
    }
}

#[async_trait]
impl ProbeSource for ArpTable {
    fn name(&self) -> &'static str {
        "arp-table"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn discover(&self, _range: NetworkRange) -> ProbeResult<Vec<RawRecord>> {
        self.read_table().await
    }
}

#[async_trait]
impl NeighborLookup for ArpTable {
    async fn lookup(&self, ip: Ipv4Addr) -> ProbeResult<MacAddr> {
        self.read_table()
            .await?
            .into_iter()
            .find(|record| record.ip == ip)
            .and_then(|record| record.mac)
            .ok_or(ProbeError::NoAnswer)
    }
}

/// Parses `/proc/net/arp`.
///
/// ```text
/// IP address       HW type     Flags       HW address            Mask     Device
/// 192.168.1.1      0x1         0x2         00:11:22:33:44:55     *        wlan0
/// ```
pub fn parse_proc_arp(text: &str) -> Vec<RawRecord> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return None;
            }
            let flags = u32::from_str_radix(cols[2].trim_start_matches("0x"), 16).ok()?;
            if flags & ATF_COM == 0 {
                return None;
            }
            record(cols[0].parse().ok()?, cols[3])
        })
        .collect()
}

/// Parses `arp -a` in its BSD/macOS and Windows flavours.
///
/// ```text
/// ? (192.168.1.1) at 0:11:22:33:44:55 on en0 ifscope [ethernet]
///   192.168.1.1           00-11-22-33-44-55     dynamic
/// ```
pub fn parse_arp_a(text: &str) -> Vec<RawRecord> {
    text.lines()
        .filter_map(|line| {
            let mut ip: Option<Ipv4Addr> = None;
            let mut hw: Option<&str> = None;
            for token in line.split_whitespace() {
                let token = token.trim_matches(|c| c == '(' || c == ')');
                if ip.is_none() {
                    ip = token.parse().ok();
                } else if hw.is_none() && (token.contains(':') || token.contains('-')) {
                    hw = Some(token);
                }
            }
            record(ip?, hw?)
        })
        .collect()
}

fn record(ip: Ipv4Addr, hw: &str) -> Option<RawRecord> {
    if ip.is_multicast() || ip.is_broadcast() || ip.is_unspecified() {
        return None;
    }
    let mac = mac::parse_mac(hw).filter(mac::is_unicast)?;
    Some(RawRecord::new(ip).with_mac(mac))
}

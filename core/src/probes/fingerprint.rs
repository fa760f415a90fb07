//! Port and OS fingerprinting through `nmap`'s grepable output.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

use devscout_common::device::PortInfo;

use super::{Fingerprint, FingerprintProber, ProbeResult, command};

const PROGRAM: &str = "nmap";

pub struct NmapFingerprint {
    timeout: Duration,
}

impl NmapFingerprint {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl FingerprintProber for NmapFingerprint {
    fn name(&self) -> &'static str {
        "nmap-fingerprint"
    }

    fn is_available(&self) -> bool {
        command::on_path(PROGRAM)
    }

    async fn fingerprint(&self, ip: Ipv4Addr) -> ProbeResult<Fingerprint> {
        let target = ip.to_string();
        // OS detection needs raw sockets; unprivileged runs still get ports.
        let args: Vec<&str> = if is_root::is_root() {
            vec!["-F", "-O", "--osscan-guess", "-oG", "-", target.as_str()]
        } else {
            vec!["-F", "-oG", "-", target.as_str()]
        };
        let text = command::stdout(PROGRAM, &args, self.timeout).await?;
        Ok(parse_grepable(&text))
    }
}

/// Parses the `Host:` lines of `nmap -oG -`.
///
/// ```text
/// Host: 192.168.1.42 ()	Ports: 22/open/tcp//ssh///, 80/closed/tcp//http///	OS: Linux 4.15 - 5.8
/// ```
pub fn parse_grepable(text: &str) -> Fingerprint {
    let mut fingerprint = Fingerprint::default();

    for line in text.lines().filter(|l| l.starts_with("Host:")) {
        for field in line.split('\t') {
            if let Some(ports) = field.strip_prefix("Ports: ") {
                fingerprint.open_ports.extend(ports.split(", ").filter_map(open_port));
            } else if let Some(os) = field.strip_prefix("OS: ") {
                let os = os.trim();
                if !os.is_empty() {
                    fingerprint.os_guess = Some(os.to_string());
                }
            }
        }
    }

    fingerprint.open_ports.sort_by_key(|p| p.port);
    fingerprint.open_ports.dedup_by_key(|p| p.port);
    fingerprint
}

fn open_port(entry: &str) -> Option<PortInfo> {
    let parts: Vec<&str> = entry.trim().split('/').collect();
    if parts.len() < 5 || parts[1] != "open" {
        return None;
    }
    let port = parts[0].parse().ok()?;
    let service = match parts[4] {
        "" => "unknown".to_string(),
        name => name.to_string(),
    };
    Some(PortInfo { port, service })
}

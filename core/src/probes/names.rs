use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task;

use super::{NameResolver, ProbeError, ProbeResult};

/// Reverse lookups through the system resolver (`getnameinfo`), so
/// `/etc/hosts`, mDNS and NSS plugins all take part.
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve(&self, ip: Ipv4Addr) -> ProbeResult<String> {
        // getnameinfo blocks; a timed-out lookup finishes on its own thread
        let lookup = task::spawn_blocking(move || dns_lookup::lookup_addr(&IpAddr::V4(ip)));

        let name = match tokio::time::timeout(self.timeout, lookup).await {
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
            Ok(Err(join)) => return Err(ProbeError::Io(io::Error::other(join))),
            Ok(Ok(Err(_))) => return Err(ProbeError::NoAnswer),
            Ok(Ok(Ok(name))) => name,
        };
        answer(ip, &name)
    }
}

/// Used when name lookups are switched off.
pub struct DisabledResolver;

#[async_trait]
impl NameResolver for DisabledResolver {
    async fn resolve(&self, _ip: Ipv4Addr) -> ProbeResult<String> {
        Err(ProbeError::Disabled)
    }
}

/// The resolver hands back the numeric address when it knows no name.
fn answer(ip: Ipv4Addr, raw: &str) -> ProbeResult<String> {
    let name = raw.trim().trim_end_matches('.');
    if name.is_empty() || name == ip.to_string() {
        return Err(ProbeError::NoAnswer);
    }
    Ok(name.to_string())
}

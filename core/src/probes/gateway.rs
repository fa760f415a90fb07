//! Default-gateway discovery, one platform tool per source.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

use super::{GatewaySource, ProbeError, ProbeResult, command};

const PROC_ROUTE: &str = "/proc/net/route";

/// The sources tried by default, most precise first.
pub fn system_sources(timeout: Duration) -> Vec<Box<dyn GatewaySource>> {
    vec![
        Box::new(IpRoute { timeout }),
        Box::new(ProcRoute),
        Box::new(BsdRoute { timeout }),
        Box::new(Netstat { timeout }),
    ]
}

/// `ip route show default` (iproute2).
pub struct IpRoute {
    pub timeout: Duration,
}

#[async_trait]
impl GatewaySource for IpRoute {
    fn name(&self) -> &'static str {
        "ip-route"
    }

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr> {
        let text = command::stdout("ip", &["route", "show", "default"], self.timeout).await?;
        parse_ip_route(&text).ok_or(ProbeError::NoAnswer)
    }
}

/// The kernel routing table in `/proc/net/route`.
pub struct ProcRoute;

#[async_trait]
impl GatewaySource for ProcRoute {
    fn name(&self) -> &'static str {
        "proc-route"
    }

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr> {
        let text = tokio::fs::read_to_string(PROC_ROUTE)
            .await
            .map_err(|_| ProbeError::Unavailable(PROC_ROUTE.to_string()))?;
        parse_proc_route(&text).ok_or(ProbeError::NoAnswer)
    }
}

/// `route -n get default` (macOS, BSD).
pub struct BsdRoute {
    pub timeout: Duration,
}

#[async_trait]
impl GatewaySource for BsdRoute {
    fn name(&self) -> &'static str {
        "route-get"
    }

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr> {
        let text = command::stdout("route", &["-n", "get", "default"], self.timeout).await?;
        parse_route_get(&text).ok_or(ProbeError::NoAnswer)
    }
}

/// `netstat -rn`, the lowest common denominator (also Windows).
pub struct Netstat {
    pub timeout: Duration,
}

#[async_trait]
impl GatewaySource for Netstat {
    fn name(&self) -> &'static str {
        "netstat"
    }

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr> {
        let text = command::stdout("netstat", &["-rn"], self.timeout).await?;
        parse_netstat(&text).ok_or(ProbeError::NoAnswer)
    }
}

/// `default via 192.168.1.1 dev wlan0 proto dhcp metric 600`
pub fn parse_ip_route(text: &str) -> Option<Ipv4Addr> {
    text.lines().find_map(|line| {
        let mut tokens = line.split_whitespace().skip_while(|t| *t != "via");
        tokens.next()?;
        tokens.next()?.parse().ok()
    })
}

/// Columns: `Iface Destination Gateway Flags ...`, addresses in little-endian hex.
pub fn parse_proc_route(text: &str) -> Option<Ipv4Addr> {
    text.lines().skip(1).find_map(|line| {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 || cols[1] != "00000000" {
            return None;
        }
        let raw = u32::from_str_radix(cols[2], 16).ok()?;
        let gateway = Ipv4Addr::from(raw.to_le_bytes());
        (!gateway.is_unspecified()).then_some(gateway)
    })
}

/// `    gateway: 192.168.1.1`
pub fn parse_route_get(text: &str) -> Option<Ipv4Addr> {
    text.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "gateway")
            .then(|| value.trim().parse().ok())
            .flatten()
    })
}

/// First non-zero IPv4 on the `default` / `0.0.0.0` route line.
pub fn parse_netstat(text: &str) -> Option<Ipv4Addr> {
    text.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        let first = tokens.next()?;
        if first != "default" && first != "0.0.0.0" {
            return None;
        }
        tokens
            .filter_map(|t| t.parse::<Ipv4Addr>().ok())
            .find(|ip| !ip.is_unspecified())
    })
}

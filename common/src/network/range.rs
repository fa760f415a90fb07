use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Range scanned when no gateway can be found by any method.
pub const FALLBACK_NETWORK: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 0);
pub const FALLBACK_PREFIX: u8 = 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid network range '{0}'")]
    Invalid(String),
    #[error("prefix /{0} is larger than 32")]
    PrefixTooLarge(u8),
}

/// An IPv4 network in CIDR form, always stored by its network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    network: Ipv4Addr,
    prefix: u8,
}

impl NetworkRange {
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, RangeError> {
        if prefix > 32 {
            return Err(RangeError::PrefixTooLarge(prefix));
        }
        let network = Ipv4Addr::from(u32::from(addr) & mask(prefix));
        Ok(Self { network, prefix })
    }

    /// The `/24` around a gateway: first three octets kept, last zeroed.
    pub fn from_gateway(gateway: Ipv4Addr) -> Self {
        let [a, b, c, _] = gateway.octets();
        Self {
            network: Ipv4Addr::new(a, b, c, 0),
            prefix: 24,
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & mask(self.prefix) == u32::from(self.network)
    }
}

impl Default for NetworkRange {
    fn default() -> Self {
        Self {
            network: FALLBACK_NETWORK,
            prefix: FALLBACK_PREFIX,
        }
    }
}

impl FromStr for NetworkRange {
    type Err = RangeError;

    /// Accepts `a.b.c.d/p` or a bare address (treated as `/32`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let net = Ipv4Network::from_str(s.trim()).map_err(|_| RangeError::Invalid(s.to_string()))?;
        Self::new(net.network(), net.prefix())
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for NetworkRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

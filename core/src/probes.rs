//! The **collaborator contracts** the discovery pipeline is built against.
//!
//! Every way of touching the network (neighbour tables, sweeps, ping, name
//! lookups, fingerprinting, gateway discovery) sits behind one of the traits
//! below. Each returns a [`ProbeResult`] so the orchestrator can map every
//! failure variant to a sentinel value explicitly.
//!
//! Concrete implementations live in the submodules and lean on what the host
//! already has: `arp-scan`, `nmap` and `ping` binaries, and its resolver.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;
use thiserror::Error;

use devscout_common::device::{PortInfo, RawRecord};
use devscout_common::network::range::NetworkRange;

pub mod arp_sweep;
pub mod arp_table;
pub mod command;
pub mod fingerprint;
pub mod gateway;
pub mod host_sweep;
pub mod names;
pub mod ping;

pub use arp_sweep::ArpSweep;
pub use arp_table::ArpTable;
pub use fingerprint::NmapFingerprint;
pub use host_sweep::HostSweep;
pub use names::{DisabledResolver, SystemResolver};
pub use ping::SystemPing;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The mechanism is not installed or not permitted here.
    #[error("{0} is not available")]
    Unavailable(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The probe ran but the target did not answer.
    #[error("no answer")]
    NoAnswer,
    #[error("{program} exited with {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("could not parse output: {0}")]
    Parse(String),
    #[error("disabled by configuration")]
    Disabled,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Reply to a single echo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingReply {
    pub reachable: bool,
    pub ttl: Option<u8>,
}

/// Result of a port/OS fingerprint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub os_guess: Option<String>,
    pub open_ports: Vec<PortInfo>,
}

/// A bulk discovery mechanism that enumerates `(ip, mac)` pairs in a range.
#[async_trait]
pub trait ProbeSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the mechanism can run in this environment at all.
    ///
    /// Checked once when the orchestrator is built.
    fn is_available(&self) -> bool;

    async fn discover(&self, range: NetworkRange) -> ProbeResult<Vec<RawRecord>>;
}

/// Resolves the hardware address of one already-known neighbour.
#[async_trait]
pub trait NeighborLookup: Send + Sync {
    async fn lookup(&self, ip: Ipv4Addr) -> ProbeResult<MacAddr>;
}

/// Reverse name resolution. Fails fast, never retries.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, ip: Ipv4Addr) -> ProbeResult<String>;
}

#[async_trait]
pub trait LivenessProber: Send + Sync {
    async fn ping(&self, ip: Ipv4Addr, timeout: Duration) -> ProbeResult<PingReply>;
}

/// Optional best-effort port and OS fingerprinting.
#[async_trait]
pub trait FingerprintProber: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    async fn fingerprint(&self, ip: Ipv4Addr) -> ProbeResult<Fingerprint>;
}

/// One way of asking the host networking stack for its default gateway.
#[async_trait]
pub trait GatewaySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr>;
}

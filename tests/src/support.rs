use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use devscout_common::config::Config;
use devscout_common::device::{PortInfo, RawRecord};
use devscout_common::network::range::NetworkRange;
use devscout_core::classifier::Classifier;
use devscout_core::discovery::{Collaborators, DiscoveryService};
use devscout_core::probes::{
    Fingerprint, FingerprintProber, GatewaySource, LivenessProber, NameResolver, NeighborLookup,
    PingReply, ProbeError, ProbeResult, ProbeSource,
};
use devscout_core::range::RangeResolver;
use devscout_core::vendors::ManufacturerResolver;

/*************************************************************
                     Fake collaborators
**************************************************************/

pub enum Outcome {
    Records(Vec<RawRecord>),
    Fail,
    Hang,
}

pub struct FakeSource {
    name: &'static str,
    available: bool,
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
    ranges: Arc<Mutex<Vec<NetworkRange>>>,
}

impl FakeSource {
    pub fn new(name: &'static str, outcome: Outcome) -> Self {
        Self {
            name,
            available: true,
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            ranges: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Counter of `discover` calls, readable after the source is moved.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Ranges `discover` was asked about, readable after the source is moved.
    pub fn ranges(&self) -> Arc<Mutex<Vec<NetworkRange>>> {
        Arc::clone(&self.ranges)
    }
}

#[async_trait]
impl ProbeSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn discover(&self, range: NetworkRange) -> ProbeResult<Vec<RawRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut ranges) = self.ranges.lock() {
            ranges.push(range);
        }
        match &self.outcome {
            Outcome::Records(records) => Ok(records.clone()),
            Outcome::Fail => Err(ProbeError::Unavailable(self.name.to_string())),
            Outcome::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

pub struct FakeNeighbors(pub HashMap<Ipv4Addr, MacAddr>);

#[async_trait]
impl NeighborLookup for FakeNeighbors {
    async fn lookup(&self, ip: Ipv4Addr) -> ProbeResult<MacAddr> {
        self.0.get(&ip).copied().ok_or(ProbeError::NoAnswer)
    }
}

pub struct FakeNames(pub HashMap<Ipv4Addr, String>);

#[async_trait]
impl NameResolver for FakeNames {
    async fn resolve(&self, ip: Ipv4Addr) -> ProbeResult<String> {
        self.0.get(&ip).cloned().ok_or(ProbeError::NoAnswer)
    }
}

#[derive(Clone, Copy)]
pub enum ScriptedPing {
    Up(u8),
    Down,
    Silent,
    Broken,
}

#[async_trait]
impl LivenessProber for ScriptedPing {
    async fn ping(&self, _ip: Ipv4Addr, timeout: Duration) -> ProbeResult<PingReply> {
        match self {
            ScriptedPing::Up(ttl) => Ok(PingReply {
                reachable: true,
                ttl: Some(*ttl),
            }),
            ScriptedPing::Down => Ok(PingReply {
                reachable: false,
                ttl: None,
            }),
            ScriptedPing::Silent => Err(ProbeError::Timeout(timeout)),
            ScriptedPing::Broken => Err(ProbeError::Unavailable("ping".into())),
        }
    }
}

pub struct FakeFingerprint {
    available: bool,
    result: Option<Fingerprint>,
    calls: Arc<AtomicUsize>,
}

impl FakeFingerprint {
    pub fn new(result: Option<Fingerprint>) -> Self {
        Self {
            available: true,
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl FingerprintProber for FakeFingerprint {
    fn name(&self) -> &'static str {
        "fake-fingerprint"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn fingerprint(&self, _ip: Ipv4Addr) -> ProbeResult<Fingerprint> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().ok_or(ProbeError::Failed {
            program: "nmap".into(),
            code: Some(1),
            stderr: "scan aborted".into(),
        })
    }
}

pub struct FixedGateway(pub Option<Ipv4Addr>);

#[async_trait]
impl GatewaySource for FixedGateway {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn default_gateway(&self) -> ProbeResult<Ipv4Addr> {
        self.0.ok_or(ProbeError::NoAnswer)
    }
}

/*************************************************************
                 A network to run the service on
**************************************************************/

pub struct Lab {
    pub sources: Vec<Arc<dyn ProbeSource>>,
    pub neighbors: HashMap<Ipv4Addr, MacAddr>,
    pub names: HashMap<Ipv4Addr, String>,
    pub ping: ScriptedPing,
    pub fingerprint: Option<FakeFingerprint>,
    pub gateway: Option<Ipv4Addr>,
    pub config: Config,
}

impl Default for Lab {
    fn default() -> Self {
        Self::new()
    }
}

impl Lab {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            neighbors: HashMap::new(),
            names: HashMap::new(),
            ping: ScriptedPing::Down,
            fingerprint: None,
            gateway: Some(Ipv4Addr::new(192, 168, 1, 1)),
            config: Config {
                probe_timeout: Duration::from_millis(200),
                ..Config::default()
            },
        }
    }

    pub fn source(mut self, source: FakeSource) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn service(self) -> DiscoveryService {
        let collaborators = Collaborators {
            sources: self.sources,
            neighbors: Arc::new(FakeNeighbors(self.neighbors)),
            names: Arc::new(FakeNames(self.names)),
            liveness: Arc::new(self.ping),
            fingerprint: self
                .fingerprint
                .map(|fp| Arc::new(fp) as Arc<dyn FingerprintProber>),
            range: RangeResolver::new(
                self.config.range,
                vec![Box::new(FixedGateway(self.gateway))],
            ),
        };
        DiscoveryService::new(
            collaborators,
            ManufacturerResolver::builtin(),
            Classifier::default(),
            &self.config,
        )
    }
}

/*************************************************************
                           Helpers
**************************************************************/

pub fn ip(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, last)
}

pub fn record(last: u8, hw: Option<[u8; 6]>) -> RawRecord {
    RawRecord {
        ip: ip(last),
        mac: hw.map(mac),
    }
}

pub fn port(port: u16, service: &str) -> PortInfo {
    PortInfo {
        port,
        service: service.to_string(),
    }
}

pub const PI_MAC: [u8; 6] = [0xB8, 0x27, 0xEB, 0x11, 0x22, 0x33];

pub fn mac(bytes: [u8; 6]) -> MacAddr {
    let [a, b, c, d, e, f] = bytes;
    MacAddr::new(a, b, c, d, e, f)
}

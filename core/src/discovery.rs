//! # Network Discovery Service
//!
//! Implements the two use cases of the tool: the bulk **scan** of the local
//! network and the **detail** query for a single address.
//!
//! The service never talks to the network itself. It is handed its
//! collaborators ([`Collaborators`]) and owns the policy around them:
//!
//! 1. which discovery sources are active (checked once, at construction),
//! 2. the fallback order between them,
//! 3. how every failure variant maps onto a sentinel field value.
//!
//! Nothing in here returns an error to the caller. A scan that finds nothing
//! is an empty `Vec`; a detail query always yields a fully-shaped [`Device`].

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use devscout_common::config::Config;
use devscout_common::device::{Device, DeviceStatus, RawRecord, UNKNOWN, mac_to_field};
use devscout_common::network::range::NetworkRange;

use crate::builder::{self, DeviceBuilder};
use crate::classifier::Classifier;
use crate::os;
use crate::probes::{
    FingerprintProber, LivenessProber, NameResolver, NeighborLookup, PingReply, ProbeError,
    ProbeResult, ProbeSource,
};
use crate::range::RangeResolver;
use crate::vendors::ManufacturerResolver;

/// Everything the service needs from the outside world.
pub struct Collaborators {
    /// Discovery sources in priority order, most accurate first.
    pub sources: Vec<Arc<dyn ProbeSource>>,
    pub neighbors: Arc<dyn NeighborLookup>,
    pub names: Arc<dyn NameResolver>,
    pub liveness: Arc<dyn LivenessProber>,
    pub fingerprint: Option<Arc<dyn FingerprintProber>>,
    pub range: RangeResolver,
}

/// Whether a named mechanism can run here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub available: bool,
}

impl SourceStatus {
    fn new(name: &str, available: bool) -> Self {
        Self {
            name: name.to_string(),
            available,
        }
    }
}

/// Application Service for Network Discovery.
pub struct DiscoveryService {
    sources: Vec<Arc<dyn ProbeSource>>,
    source_status: Vec<SourceStatus>,
    neighbors: Arc<dyn NeighborLookup>,
    names: Arc<dyn NameResolver>,
    liveness: Arc<dyn LivenessProber>,
    fingerprint: Option<Arc<dyn FingerprintProber>>,
    fingerprint_status: Option<SourceStatus>,
    range: RangeResolver,
    vendors: ManufacturerResolver,
    classifier: Classifier,
    concurrency: usize,
    probe_timeout: Duration,
    ping_timeout: Duration,
    name_timeout: Duration,
}

impl DiscoveryService {
    /// Builds the service, querying every collaborator's availability once.
    pub fn new(
        collaborators: Collaborators,
        vendors: ManufacturerResolver,
        classifier: Classifier,
        cfg: &Config,
    ) -> Self {
        let Collaborators {
            sources,
            neighbors,
            names,
            liveness,
            fingerprint,
            range,
        } = collaborators;

        let mut source_status = Vec::with_capacity(sources.len());
        let mut active = Vec::with_capacity(sources.len());
        for source in sources {
            let available = source.is_available();
            debug!("source {}: available={available}", source.name());
            source_status.push(SourceStatus::new(source.name(), available));
            if available {
                active.push(source);
            }
        }

        let fingerprint_status = fingerprint
            .as_ref()
            .map(|fp| SourceStatus::new(fp.name(), fp.is_available()));
        let fingerprint = fingerprint.filter(|fp| {
            let available = fp.is_available();
            if !available {
                debug!("fingerprinting requested but {} is not available", fp.name());
            }
            available
        });

        Self {
            sources: active,
            source_status,
            neighbors,
            names,
            liveness,
            fingerprint,
            fingerprint_status,
            range,
            vendors,
            classifier,
            concurrency: cfg.concurrency.max(1),
            probe_timeout: cfg.probe_timeout,
            ping_timeout: cfg.ping_timeout,
            name_timeout: cfg.name_timeout,
        }
    }

    /// Names of the sources a scan will try, in order.
    pub fn active_sources(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Availability of every configured source, active or not.
    pub fn source_status(&self) -> &[SourceStatus] {
        &self.source_status
    }

    /// `None` when no fingerprint prober was configured.
    pub fn fingerprint_status(&self) -> Option<&SourceStatus> {
        self.fingerprint_status.as_ref()
    }

    pub fn range_resolver(&self) -> &RangeResolver {
        &self.range
    }

    pub async fn network_range(&self) -> NetworkRange {
        self.range.resolve().await
    }

    /// Scans the resolved local network.
    pub async fn scan(&self) -> Vec<Device> {
        let range = self.network_range().await;
        self.scan_range(range).await
    }

    pub async fn scan_range(&self, range: NetworkRange) -> Vec<Device> {
        let records = dedupe(self.discover(range).await);
        let names = self.resolve_names(&records).await;

        // Ordinals are handed out here, in discovery order, never by
        // lookup completion order.
        let mut builder = DeviceBuilder::new(&self.vendors, &self.classifier);
        for (record, name) in records.into_iter().zip(names) {
            builder.push(record, name);
        }
        info!("found {} devices in {range}", builder.len());
        builder.finish()
    }

    /// Raw records from the first active source that yields any.
    async fn discover(&self, range: NetworkRange) -> Vec<RawRecord> {
        for source in &self.sources {
            debug!("trying {} on {range}", source.name());
            match tokio::time::timeout(self.probe_timeout, source.discover(range)).await {
                Ok(Ok(records)) if !records.is_empty() => {
                    info!("{} reported {} hosts", source.name(), records.len());
                    return records;
                }
                Ok(Ok(_)) => debug!("{} reported no hosts", source.name()),
                Ok(Err(e)) => debug!("{} failed: {e}", source.name()),
                Err(_) => debug!("{} timed out after {:?}", source.name(), self.probe_timeout),
            }
        }

        if self.sources.is_empty() {
            warn!("no discovery source is available");
        } else {
            warn!("no discovery source found any hosts in {range}");
        }
        Vec::new()
    }

    /// Looks up every name with bounded concurrency; results keep input order.
    async fn resolve_names(&self, records: &[RawRecord]) -> Vec<Option<String>> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = records
            .iter()
            .map(|record| {
                let names = Arc::clone(&self.names);
                let permits = Arc::clone(&permits);
                let ip = record.ip;
                let timeout = self.name_timeout;
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.ok()?;
                    lookup_name(names.as_ref(), ip, timeout).await
                })
            })
            .collect();

        let mut resolved = Vec::with_capacity(handles.len());
        for handle in handles {
            resolved.push(handle.await.unwrap_or_else(|e| {
                debug!("name lookup task failed: {e}");
                None
            }));
        }
        resolved
    }

    /// Everything that can be learned about one address.
    ///
    /// Each step runs regardless of how the previous one went.
    pub async fn device_details(&self, ip: Ipv4Addr) -> Device {
        let mut device = Device::unresolved(builder::detail_id(ip), ip);

        let mac = match self.neighbors.lookup(ip).await {
            Ok(mac) => Some(mac),
            Err(e) => {
                debug!("no hardware address for {ip}: {e}");
                None
            }
        };
        device.mac = mac_to_field(mac);

        let name = lookup_name(self.names.as_ref(), ip, self.name_timeout).await;

        device.status = liveness_status(ip, self.liveness.ping(ip, self.ping_timeout).await);
        let mut os = match device.status {
            DeviceStatus::Online => os_from_echo(ip, self.liveness.ping(ip, self.ping_timeout).await),
            _ => None,
        };

        let mut ports = Vec::new();
        if let Some(prober) = &self.fingerprint
            && device.status != DeviceStatus::Offline
        {
            match prober.fingerprint(ip).await {
                Ok(fp) => {
                    if let Some(guess) = fp.os_guess.filter(|g| !g.trim().is_empty()) {
                        os = Some(guess);
                    }
                    ports = fp.open_ports;
                }
                Err(e) => debug!("{} on {ip} failed: {e}", prober.name()),
            }
        }

        let (manufacturer, device_type) =
            builder::identify(&self.vendors, &self.classifier, &device.mac, name.as_deref());
        device.manufacturer = manufacturer;
        device.device_type = device_type;
        device.name = name.unwrap_or_else(|| UNKNOWN.to_string());
        device.os = Some(os.unwrap_or_else(|| UNKNOWN.to_string()));
        device.ports = Some(ports);
        device.last_seen = Some(Utc::now());
        device
    }
}

/// Collapses repeated addresses.
///
/// The first occurrence keeps its position, the last known hardware address
/// wins, and a record without one never erases a known address.
pub fn dedupe(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen: HashMap<Ipv4Addr, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<RawRecord> = Vec::with_capacity(records.len());

    for record in records {
        match seen.get(&record.ip) {
            Some(&pos) => {
                if record.mac.is_some() {
                    unique[pos].mac = record.mac;
                }
            }
            None => {
                seen.insert(record.ip, unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

async fn lookup_name(names: &dyn NameResolver, ip: Ipv4Addr, timeout: Duration) -> Option<String> {
    match tokio::time::timeout(timeout, names.resolve(ip)).await {
        Ok(Ok(name)) => {
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        }
        Ok(Err(ProbeError::Disabled)) => None,
        Ok(Err(e)) => {
            debug!("no name for {ip}: {e}");
            None
        }
        Err(_) => {
            debug!("name lookup for {ip} timed out after {timeout:?}");
            None
        }
    }
}

/// Maps one echo attempt onto a status.
///
/// Silence means the host is down; a prober that could not run at all
/// tells us nothing.
fn liveness_status(ip: Ipv4Addr, reply: ProbeResult<PingReply>) -> DeviceStatus {
    match reply {
        Ok(PingReply { reachable: true, .. }) => DeviceStatus::Online,
        Ok(_) | Err(ProbeError::Timeout(_)) | Err(ProbeError::NoAnswer) => DeviceStatus::Offline,
        Err(e) => {
            debug!("liveness of {ip} unknown: {e}");
            DeviceStatus::Unknown
        }
    }
}

fn os_from_echo(ip: Ipv4Addr, reply: ProbeResult<PingReply>) -> Option<String> {
    match reply {
        Ok(PingReply { ttl: Some(ttl), .. }) => Some(os::os_from_ttl(ttl).to_string()),
        Ok(_) => {
            debug!("echo reply from {ip} carried no TTL");
            None
        }
        Err(e) => {
            debug!("TTL probe of {ip} failed: {e}");
            None
        }
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

//! Wires the **system adapters** into a [`DiscoveryService`].
//!
//! This is the only place that knows which concrete probes exist and in what
//! order they are tried:
//!
//! 1. [`ArpSweep`]: active `arp-scan` (privileged)
//! 2. [`ArpTable`]: the kernel neighbour cache (always available)
//! 3. [`HostSweep`]: `nmap -sn`
//!
//! **Architectural Note:**
//! High-level code should depend on [`DiscoveryService`] and the traits in
//! [`crate::probes`], never on the adapters directly. Tests swap the adapters
//! for in-memory fakes through [`Collaborators`].

use std::sync::Arc;

use devscout_common::config::Config;

use crate::classifier::Classifier;
use crate::discovery::{Collaborators, DiscoveryService};
use crate::probes::{
    ArpSweep, ArpTable, DisabledResolver, FingerprintProber, HostSweep, NameResolver,
    NmapFingerprint, ProbeSource, SystemPing, SystemResolver,
};
use crate::range::RangeResolver;
use crate::vendors::{ManufacturerResolver, VendorTableError};

/// Collaborators backed by the host's own tools, configured by `cfg`.
pub fn system_collaborators(cfg: &Config) -> Collaborators {
    let table = Arc::new(ArpTable::new(cfg.probe_timeout));

    let sources: Vec<Arc<dyn ProbeSource>> = vec![
        Arc::new(ArpSweep::new(cfg.probe_timeout)),
        table.clone(),
        Arc::new(HostSweep::new(cfg.probe_timeout)),
    ];

    let names: Arc<dyn NameResolver> = if cfg.no_dns {
        Arc::new(DisabledResolver)
    } else {
        Arc::new(SystemResolver::new(cfg.name_timeout))
    };

    let fingerprint = cfg
        .fingerprint
        .then(|| Arc::new(NmapFingerprint::new(cfg.probe_timeout)) as Arc<dyn FingerprintProber>);

    Collaborators {
        sources,
        neighbors: table,
        names,
        liveness: Arc::new(SystemPing),
        fingerprint,
        range: RangeResolver::system(cfg),
    }
}

/// The service a CLI invocation runs against.
///
/// Fails only when the configured vendor file cannot be loaded.
pub fn system_service(cfg: &Config) -> Result<DiscoveryService, VendorTableError> {
    let vendors = ManufacturerResolver::from_config(cfg)?;
    Ok(DiscoveryService::new(
        system_collaborators(cfg),
        vendors,
        Classifier::default(),
        cfg,
    ))
}

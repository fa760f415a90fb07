//! Host facts reported by the `status` command.

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::debug;

use devscout_common::device::UNKNOWN;
use devscout_common::network::range::NetworkRange;

use crate::discovery::{DiscoveryService, SourceStatus};

/// What this machine can do, and which network a scan would cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub version: String,
    pub os: String,
    pub hostname: String,
    pub privileged: bool,
    pub sources: Vec<SourceStatus>,
    pub fingerprint: Option<SourceStatus>,
    pub default_gateway: Option<Ipv4Addr>,
    pub network_range: NetworkRange,
}

impl StatusReport {
    pub async fn collect(service: &DiscoveryService) -> Self {
        let resolver = service.range_resolver();
        let default_gateway = resolver.default_gateway().await;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: os_description(),
            hostname: hostname(),
            privileged: is_root::is_root(),
            sources: service.source_status().to_vec(),
            fingerprint: service.fingerprint_status().cloned(),
            default_gateway,
            network_range: resolver.range_for(default_gateway),
        }
    }
}

fn os_description() -> String {
    let os_type = sys_info::os_type();
    let release = sys_info::os_release();
    match (os_type, release) {
        (Ok(os), Ok(release)) => format!("{os} {release}"),
        (Ok(os), Err(e)) => {
            debug!("OS release unavailable: {e}");
            os
        }
        (Err(e), _) => {
            debug!("OS type unavailable: {e}");
            UNKNOWN.to_string()
        }
    }
}

fn hostname() -> String {
    sys_info::hostname().unwrap_or_else(|e| {
        debug!("hostname unavailable: {e}");
        UNKNOWN.to_string()
    })
}

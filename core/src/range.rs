//! # Network Range Resolution
//!
//! Picks the subnet a scan covers: a configured override if there is one,
//! otherwise the `/24` around the default gateway, otherwise
//! [`NetworkRange::default`]. Resolution never fails.

use std::net::Ipv4Addr;

use tracing::{debug, info};

use devscout_common::config::Config;
use devscout_common::network::range::NetworkRange;

use crate::probes::GatewaySource;
use crate::probes::gateway;

pub struct RangeResolver {
    override_range: Option<NetworkRange>,
    sources: Vec<Box<dyn GatewaySource>>,
}

impl RangeResolver {
    pub fn new(override_range: Option<NetworkRange>, sources: Vec<Box<dyn GatewaySource>>) -> Self {
        Self {
            override_range,
            sources,
        }
    }

    /// The host's own gateway sources, honouring `cfg.range`.
    pub fn system(cfg: &Config) -> Self {
        Self::new(cfg.range, gateway::system_sources(cfg.probe_timeout))
    }

    /// First gateway any source reports, trying them in order.
    pub async fn default_gateway(&self) -> Option<Ipv4Addr> {
        for source in &self.sources {
            match source.default_gateway().await {
                Ok(gw) => {
                    debug!("default gateway {gw} via {}", source.name());
                    return Some(gw);
                }
                Err(e) => debug!("{} found no default gateway: {e}", source.name()),
            }
        }
        None
    }

    /// Range for an already-known gateway, still honouring the override.
    pub fn range_for(&self, gateway: Option<Ipv4Addr>) -> NetworkRange {
        if let Some(range) = self.override_range {
            return range;
        }
        match gateway {
            Some(gw) => NetworkRange::from_gateway(gw),
            None => {
                let fallback = NetworkRange::default();
                info!("no default gateway found, assuming {fallback}");
                fallback
            }
        }
    }

    pub async fn resolve(&self) -> NetworkRange {
        if let Some(range) = self.override_range {
            debug!("using configured range {range}");
            return range;
        }
        let gateway = self.default_gateway().await;
        self.range_for(gateway)
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::network::range::NetworkRange;

pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_NAME_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct Config {
    /// Disables reverse name lookups.
    ///
    /// Devices keep their placeholder names when set.
    pub no_dns: bool,
    /// Scan this network instead of the one derived from the default gateway.
    pub range: Option<NetworkRange>,
    /// Runs the port/OS fingerprint probe during device detail queries.
    pub fingerprint: bool,
    /// Falls back to the full IEEE OUI database when the curated vendor table misses.
    pub oui_db: bool,
    /// Extra `PREFIX,Vendor` entries layered over the built-in vendor table.
    pub vendor_file: Option<PathBuf>,
    /// Upper bound on concurrent per-host lookups.
    pub concurrency: usize,
    /// Deadline for a whole discovery sweep.
    pub probe_timeout: Duration,
    /// Deadline for one liveness probe.
    pub ping_timeout: Duration,
    /// Deadline for one reverse name lookup.
    pub name_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_dns: false,
            range: None,
            fingerprint: false,
            oui_db: false,
            vendor_file: None,
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            name_timeout: DEFAULT_NAME_TIMEOUT,
        }
    }
}

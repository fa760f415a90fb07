pub mod device;
pub mod scan;
pub mod status;

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use devscout_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_NAME_TIMEOUT};
use devscout_common::network::range::NetworkRange;

#[derive(Parser)]
#[command(name = "devscout", version)]
#[command(about = "Finds and identifies the devices on your local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip reverse name lookups
    #[arg(long, global = true, env = "DEVSCOUT_NO_DNS")]
    pub no_dns: bool,

    /// Network to scan instead of the one around the default gateway
    #[arg(long, global = true, value_name = "CIDR", env = "DEVSCOUT_RANGE")]
    pub range: Option<NetworkRange>,

    /// Probe open ports and the OS when querying a single device (needs nmap)
    #[arg(long, global = true, env = "DEVSCOUT_FINGERPRINT")]
    pub fingerprint: bool,

    /// Fall back to the full IEEE OUI database for unknown vendors
    #[arg(long, global = true, env = "DEVSCOUT_OUI_DB")]
    pub oui_db: bool,

    /// Extra 'PREFIX,Vendor' lines layered over the built-in vendor table
    #[arg(long, global = true, value_name = "PATH", env = "DEVSCOUT_VENDOR_FILE")]
    pub vendor_file: Option<PathBuf>,

    /// Maximum number of concurrent name lookups
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY, env = "DEVSCOUT_CONCURRENCY")]
    pub concurrency: usize,

    /// Seconds a discovery sweep may take
    #[arg(long, global = true, value_name = "SECS", default_value_t = 30, env = "DEVSCOUT_PROBE_TIMEOUT")]
    pub probe_timeout: u64,

    /// Seconds to wait for a ping reply
    #[arg(long, global = true, value_name = "SECS", default_value_t = 1, env = "DEVSCOUT_PING_TIMEOUT")]
    pub ping_timeout: u64,

    /// More diagnostics on stderr (-vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings and errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover the devices on the local network
    #[command(alias = "s")]
    Scan,
    /// Everything that can be learned about one device
    #[command(alias = "d")]
    Device { ip: Ipv4Addr },
    /// Show what this machine can probe with
    Status,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Explicit level from the flags; `None` defers to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, true) => Some(LevelFilter::WARN),
            (0, false) => None,
            (1, _) => Some(LevelFilter::DEBUG),
            _ => Some(LevelFilter::TRACE),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            no_dns: self.no_dns,
            range: self.range,
            fingerprint: self.fingerprint,
            oui_db: self.oui_db,
            vendor_file: self.vendor_file.clone(),
            concurrency: self.concurrency,
            probe_timeout: Duration::from_secs(self.probe_timeout),
            ping_timeout: Duration::from_secs(self.ping_timeout),
            name_timeout: DEFAULT_NAME_TIMEOUT,
        }
    }
}

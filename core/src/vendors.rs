//! # Manufacturer Resolution
//!
//! Maps hardware-address prefixes to vendor names.
//!
//! The [`VendorTable`] is plain data: a small curated table ships built in,
//! a user file can extend or override it, and the full IEEE OUI database
//! ([`MacOuiRepo`]) can be chained in behind it. [`ManufacturerResolver`]
//! walks its repositories in order and degrades to [`UNKNOWN`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use mac_oui::Oui;
use thiserror::Error;
use tracing::{debug, warn};

use devscout_common::config::Config;
use devscout_common::device::UNKNOWN;
use devscout_common::network::mac;
use devscout_common::vendors::VendorRepository;

mod builtin;

/// Prefix lengths tried, longest (most specific) first.
const PREFIX_LENGTHS: [usize; 3] = [8, 7, 6];

#[derive(Debug, Error)]
pub enum VendorTableError {
    #[error("could not read vendor file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: expected 'PREFIX,Vendor', got '{content}'")]
    Malformed { line: usize, content: String },
}

/// Prefix → vendor table matched longest-prefix-first.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    entries: HashMap<String, String>,
}

impl VendorTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The curated table that ships with devscout.
    pub fn builtin() -> Self {
        Self::from_entries(builtin::ENTRIES.iter().copied())
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::empty();
        for (prefix, vendor) in entries {
            table.insert(prefix, vendor);
        }
        table
    }

    /// Adds or overrides one entry. The prefix is normalized like an address.
    pub fn insert(&mut self, prefix: &str, vendor: &str) {
        self.entries
            .insert(mac::prefix_form(prefix), vendor.trim().to_string());
    }

    /// Layers `PREFIX,Vendor` lines over the table. Blank lines and `#`
    /// comments are skipped; a tab works as separator too.
    ///
    /// A prefix that does not normalize to colon-separated hex pairs could
    /// never match an address and is rejected as malformed.
    pub fn extend_from_str(&mut self, text: &str) -> Result<usize, VendorTableError> {
        let mut added = 0;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (prefix, vendor) = line
                .split_once(',')
                .or_else(|| line.split_once('\t'))
                .filter(|(p, v)| is_prefix_key(&mac::prefix_form(p)) && !v.trim().is_empty())
                .ok_or_else(|| VendorTableError::Malformed {
                    line: idx + 1,
                    content: line.to_string(),
                })?;
            self.insert(prefix, vendor);
            added += 1;
        }
        Ok(added)
    }

    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, VendorTableError> {
        let text = std::fs::read_to_string(path).map_err(|source| VendorTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_str(&text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VendorRepository for VendorTable {
    fn get_vendor(&self, mac: &str) -> Option<String> {
        let normalized = mac::prefix_form(mac);
        PREFIX_LENGTHS.iter().find_map(|&len| {
            let prefix = normalized.get(..len)?;
            self.entries.get(prefix).cloned()
        })
    }
}

/// `B8`, `B8:27:E` or `B8:27:EB`: one or two hex digits per group.
fn is_prefix_key(key: &str) -> bool {
    key.split(':')
        .all(|group| (1..=2).contains(&group.len()) && group.chars().all(|c| c.is_ascii_hexdigit()))
}

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally unique identifier** database.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("failed to load OUI database: {e:?}");
                None
            }
        })
        .as_ref()
}

/// The full IEEE registry, bundled by `mac_oui`.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, raw: &str) -> Option<String> {
        let addr = mac::parse_mac(raw)?;
        let db = get_oui_db()?;
        match db.lookup_by_mac(&addr.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            Ok(None) => None,
            Err(e) => {
                debug!("OUI lookup for {addr} failed: {e:?}");
                None
            }
        }
    }
}

/// Resolves a manufacturer by asking each repository in turn.
pub struct ManufacturerResolver {
    repos: Vec<Box<dyn VendorRepository>>,
}

impl ManufacturerResolver {
    pub fn new(repos: Vec<Box<dyn VendorRepository>>) -> Self {
        Self { repos }
    }

    pub fn builtin() -> Self {
        Self::new(vec![Box::new(VendorTable::builtin())])
    }

    /// Built-in table, overlaid with the configured vendor file, optionally
    /// backed by the OUI database.
    pub fn from_config(cfg: &Config) -> Result<Self, VendorTableError> {
        let mut table = VendorTable::builtin();
        if let Some(path) = &cfg.vendor_file {
            let added = table.extend_from_file(path)?;
            debug!("loaded {added} vendor entries from {}", path.display());
        }

        let mut repos: Vec<Box<dyn VendorRepository>> = vec![Box::new(table)];
        if cfg.oui_db {
            repos.push(Box::new(MacOuiRepo));
        }
        Ok(Self::new(repos))
    }

    /// Vendor for `mac`, or [`UNKNOWN`]. Never fails.
    pub fn resolve(&self, mac: &str) -> String {
        self.repos
            .iter()
            .find_map(|repo| repo.get_vendor(mac))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

impl Default for ManufacturerResolver {
    fn default() -> Self {
        Self::builtin()
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

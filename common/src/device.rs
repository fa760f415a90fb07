//! # Device Model
//!
//! The canonical record handed to callers, plus the raw probe output it is
//! assembled from.
//!
//! Fields that could not be resolved carry explicit sentinels ([`UNKNOWN`],
//! [`DeviceType::Unknown`], [`DeviceStatus::Unknown`]) instead of being
//! absent, so consumers never branch on missing versus present.

use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

/// Sentinel used for every string field that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// One `(ip, mac)` pair as reported by a discovery mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub ip: Ipv4Addr,
    pub mac: Option<MacAddr>,
}

impl RawRecord {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self { ip, mac: None }
    }

    pub fn with_mac(mut self, mac: MacAddr) -> Self {
        self.mac = Some(mac);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Smartphone,
    Iot,
    Computer,
    Entertainment,
    Unknown,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Smartphone => "smartphone",
            DeviceType::Iot => "iot",
            DeviceType::Computer => "computer",
            DeviceType::Entertainment => "entertainment",
            DeviceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortInfo {
    pub port: u16,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub ip: Ipv4Addr,
    pub mac: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub manufacturer: String,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<PortInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Device {
    /// A record for `ip` with every other field at its sentinel.
    pub fn unresolved(id: String, ip: Ipv4Addr) -> Self {
        Self {
            id,
            ip,
            mac: UNKNOWN.to_string(),
            name: UNKNOWN.to_string(),
            device_type: DeviceType::Unknown,
            manufacturer: UNKNOWN.to_string(),
            status: DeviceStatus::Unknown,
            ports: None,
            os: None,
            last_seen: None,
        }
    }

    /// Same record with the detail-query timestamp cleared.
    ///
    /// Two detail queries against an unchanged network compare equal after this.
    pub fn without_timestamp(&self) -> Self {
        Self {
            last_seen: None,
            ..self.clone()
        }
    }
}

/// Renders a resolved hardware address, or the sentinel.
pub fn mac_to_field(mac: Option<MacAddr>) -> String {
    mac.map(|m| m.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

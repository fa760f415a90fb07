//! # Device Record Builder
//!
//! Turns raw `(ip, mac)` pairs into canonical [`Device`] records.
//!
//! Ordinals come from the number of devices already pushed into *this*
//! builder, so every scan numbers its devices from 1 and two scans never
//! share state.

use std::net::Ipv4Addr;

use devscout_common::device::{Device, DeviceStatus, DeviceType, RawRecord, mac_to_field};

use crate::classifier::Classifier;
use crate::vendors::ManufacturerResolver;

pub struct DeviceBuilder<'a> {
    vendors: &'a ManufacturerResolver,
    classifier: &'a Classifier,
    devices: Vec<Device>,
}

impl<'a> DeviceBuilder<'a> {
    pub fn new(vendors: &'a ManufacturerResolver, classifier: &'a Classifier) -> Self {
        Self {
            vendors,
            classifier,
            devices: Vec::new(),
        }
    }

    /// 1-based ordinal the next pushed device will receive.
    pub fn next_ordinal(&self) -> usize {
        self.devices.len() + 1
    }

    /// Appends one bulk-scan device. `name` is `None` when resolution failed.
    pub fn push(&mut self, record: RawRecord, name: Option<String>) -> &Device {
        let ordinal = self.next_ordinal();
        let mac = mac_to_field(record.mac);
        let (manufacturer, device_type) =
            identify(self.vendors, self.classifier, &mac, name.as_deref());

        self.devices.push(Device {
            id: format!("dev-{ordinal}"),
            ip: record.ip,
            mac,
            name: name.unwrap_or_else(|| format!("Device-{ordinal}")),
            device_type,
            manufacturer,
            // only hosts that answered are ever enumerated
            status: DeviceStatus::Online,
            ports: None,
            os: None,
            last_seen: None,
        });
        &self.devices[ordinal - 1]
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn finish(self) -> Vec<Device> {
        self.devices
    }
}

/// Identifier of a detail-query record: the address digits without dots.
pub fn detail_id(ip: Ipv4Addr) -> String {
    let digits: String = ip.to_string().chars().filter(|c| *c != '.').collect();
    format!("dev-{digits}")
}

/// Manufacturer and category for a device.
///
/// Placeholders never reach the classifier: an unresolved name is classified
/// as the empty string.
pub fn identify(
    vendors: &ManufacturerResolver,
    classifier: &Classifier,
    mac: &str,
    name: Option<&str>,
) -> (String, DeviceType) {
    let manufacturer = vendors.resolve(mac);
    let device_type = classifier.classify(name.unwrap_or_default(), &manufacturer);
    (manufacturer, device_type)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

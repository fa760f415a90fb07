//! Curated prefixes for the vendors the classifier knows about, plus the
//! hypervisors and network gear that commonly show up on home LANs.
//!
//! Names are deliberately short (`Apple`, not `Apple, Inc.`) because the
//! classifier matches them verbatim.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    // Raspberry Pi
    ("B8:27:EB", "Raspberry Pi"),
    ("DC:A6:32", "Raspberry Pi"),
    ("E4:5F:01", "Raspberry Pi"),
    ("D8:3A:DD", "Raspberry Pi"),
    ("28:CD:C1", "Raspberry Pi"),
    // Apple
    ("00:03:93", "Apple"),
    ("00:1B:63", "Apple"),
    ("3C:07:54", "Apple"),
    ("3C:E0:72", "Apple"),
    ("68:D9:3C", "Apple"),
    ("A4:83:E7", "Apple"),
    ("AC:BC:32", "Apple"),
    ("F0:18:98", "Apple"),
    // Samsung
    ("00:12:FB", "Samsung"),
    ("5C:0A:5B", "Samsung"),
    ("8C:77:12", "Samsung"),
    ("F8:04:2E", "Samsung"),
    // Google
    ("3C:5A:B4", "Google"),
    ("54:60:09", "Google"),
    ("F4:F5:D8", "Google"),
    ("F8:8F:CA", "Google"),
    // Xiaomi
    ("28:6C:07", "Xiaomi"),
    ("64:09:80", "Xiaomi"),
    ("F8:A4:5F", "Xiaomi"),
    // OnePlus
    ("94:65:2D", "OnePlus"),
    ("C0:EE:FB", "OnePlus"),
    // Huawei
    ("00:E0:FC", "Huawei"),
    ("28:6E:D4", "Huawei"),
    ("48:46:FB", "Huawei"),
    // Amazon
    ("44:65:0D", "Amazon"),
    ("68:37:E9", "Amazon"),
    ("F0:27:2D", "Amazon"),
    ("FC:A1:83", "Amazon"),
    // Philips Hue bridges
    ("00:17:88", "Philips"),
    // Nest
    ("18:B4:30", "Nest"),
    ("64:16:66", "Nest"),
    // Streaming boxes and speakers
    ("B0:A7:37", "Roku"),
    ("DC:3A:5E", "Roku"),
    ("00:0E:58", "Sonos"),
    ("5C:AA:FD", "Sonos"),
    // Hypervisors
    ("00:05:69", "VMware"),
    ("00:0C:29", "VMware"),
    ("00:50:56", "VMware"),
    ("08:00:27", "VirtualBox"),
    ("52:54:00", "QEMU"),
    // Network equipment
    ("50:C7:BF", "TP-Link"),
    ("EC:08:6B", "TP-Link"),
    ("00:1B:21", "Intel"),
    ("3C:97:0E", "Intel"),
];

//! OS family guessed from the TTL of an echo reply.
//!
//! Hosts start from 64 (Linux, macOS, BSD), 128 (Windows) or 255 (routers,
//! switches, printers). Replies on a local segment arrive at or just under
//! the initial value, so the bucket boundaries sit on those values.

pub const LINUX_UNIX: &str = "Linux/Unix";
pub const WINDOWS: &str = "Windows";
pub const NETWORK_EQUIPMENT: &str = "Network Equipment";

pub fn os_from_ttl(ttl: u8) -> &'static str {
    match ttl {
        0..=64 => LINUX_UNIX,
        65..=128 => WINDOWS,
        _ => NETWORK_EQUIPMENT,
    }
}

//! Hardware address normalization.
//!
//! Probes report addresses in whatever shape the underlying tool prints them:
//! `B8:27:EB:11:22:33`, `b8-27-eb-11-22-33`, `b827.eb11.2233`, `B827EB112233`
//! or macOS-style `b8:27:eb:1:2:3`. Everything here funnels those into either a
//! [`MacAddr`] or the uppercase colon form used for prefix matching.

use std::str::FromStr;

use pnet::util::MacAddr;

/// Parses a probe-reported hardware address.
///
/// Returns `None` for malformed input and for the all-zero address that
/// neighbour tables use for incomplete entries.
pub fn parse_mac(raw: &str) -> Option<MacAddr> {
    let colon_form = to_colon_form(raw.trim());
    let mac = MacAddr::from_str(&colon_form).ok()?;
    if mac == MacAddr::zero() {
        return None;
    }
    Some(mac)
}

/// Uppercase, colon-separated rendering of `raw` for prefix comparisons.
///
/// Never fails. Input that cannot be regrouped is simply uppercased so the
/// caller's prefix match misses instead of erroring.
pub fn prefix_form(raw: &str) -> String {
    to_colon_form(raw.trim()).to_ascii_uppercase()
}

/// Whether an address is worth reporting as a device.
pub fn is_unicast(mac: &MacAddr) -> bool {
    *mac != MacAddr::zero() && *mac != MacAddr::broadcast() && mac.0 & 0x01 == 0
}

fn to_colon_form(raw: &str) -> String {
    if raw.contains(':') {
        return raw.to_string();
    }
    if raw.contains('-') {
        return raw.replace('-', ":");
    }

    // full addresses and bare OUI prefixes such as `B827EB` alike
    let bare: String = raw.chars().filter(|c| *c != '.').collect();
    if (2..=12).contains(&bare.len())
        && bare.len() % 2 == 0
        && bare.chars().all(|c| c.is_ascii_hexdigit())
    {
        return bare
            .as_bytes()
            .chunks(2)
            .filter_map(|pair| std::str::from_utf8(pair).ok())
            .collect::<Vec<&str>>()
            .join(":");
    }

    raw.to_string()
}

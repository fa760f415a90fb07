//! Network value objects: hardware addresses and scan ranges.

pub mod mac;
pub mod range;

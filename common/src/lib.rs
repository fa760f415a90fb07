//! # devscout common
//!
//! Shared models and value objects used by every layer of `devscout`.
//!
//! * **[`device`]**: The canonical [`device::Device`] record and the raw probe output it is built from.
//! * **[`network`]**: Hardware address normalization and the [`network::range::NetworkRange`] value object.
//! * **[`vendors`]**: The contract for manufacturer lookups.
//! * **[`config`]**: Runtime knobs shared between the CLI and the discovery core.

pub mod config;
pub mod device;
pub mod network;
pub mod vendors;

//! # devscout core
//!
//! The device discovery and classification pipeline.
//!
//! * **[`discovery`]**: the application service. Runs bulk scans and
//!   single-device detail queries against a set of collaborators.
//! * **[`probes`]**: the collaborator traits and the adapters that shell out
//!   to the host's tools.
//! * **[`vendors`]**, **[`classifier`]**, **[`os`]**: pure heuristics over
//!   untrusted signals (address prefixes, hostnames, TTLs).
//! * **[`builder`]**: assembles canonical device records.
//! * **[`range`]**: decides which subnet a scan covers.
//! * **[`scanner`]**: wires the system adapters together.

pub mod builder;
pub mod classifier;
pub mod discovery;
pub mod os;
pub mod probes;
pub mod range;
pub mod scanner;
pub mod system;
pub mod vendors;

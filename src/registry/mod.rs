//! Vendor registry cache
//!
//! This module owns the mapping from 6-hex-digit OUI prefixes to vendor names.
//! The registry persists to a single flat file with a last-updated timestamp,
//! degrades gracefully to an empty mapping when the file is missing or
//! corrupt, and refreshes itself from the public IEEE OUI listing.

mod source;
mod store;

pub use source::{parse_listing, OuiSource, SourceError};
pub use store::{LoadOutcome, RegistryStore, VendorRegistry, TIMESTAMP_FORMAT};

//! Appearance-settings wire versions.

/// Latest appearance-settings packet layout this crate reads and writes.
pub const LATEST_SETTINGS_VERSION: u16 = 0;

/// Transport-level identifier for appearance-settings packets.
pub const SETTINGS_PACKET_ID: &str = "tails2d/appearance";

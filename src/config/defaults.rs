//! Timing defaults, in milliseconds.

pub const SETTLE_MS: u64 = 2_000;
pub const CHAR_DELAY_MS: u64 = 50;
pub const DRAIN_MS: u64 = 1_000;
pub const READ_TIMEOUT_MS: u64 = 1_000;

pub const QUIET_MS: u64 = 200;
pub const RECEIVE_TIMEOUT_MS: u64 = 5_000;

/// Upper bound accepted for any single delay.
pub const MAX_DELAY_MS: u64 = 60_000;

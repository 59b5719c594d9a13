//! Shared constants and invariants

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Platform tokens hold for roughly six hours before the third party
/// starts rejecting them.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 6 * 60 * 60;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_METRICS_PATH: &str = "/metrics";

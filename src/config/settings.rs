use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_METRICS_PATH, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_SECS,
};

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub upstream: UpstreamConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_string(), port: DEFAULT_PORT }
    }
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// How long a generated credential is served before a new round runs.
    pub ttl: Duration,
    /// Upper bound on one generation call.
    pub generation_timeout: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }
}

/// Endpoint of the sidecar that embeds the platform SDK.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub path: String,
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { path: DEFAULT_METRICS_PATH.to_string(), is_enabled: false }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

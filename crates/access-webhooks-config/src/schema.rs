//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        app_dir().join("config.toml")
    }
}

/// Connection settings for the webhook registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the access controller, e.g. `https://192.168.1.1:12445`.
    #[serde(default)]
    pub host: String,

    /// Bearer token for the developer API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Skip certificate verification entirely.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// PEM bundle trusted in addition to the system roots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            token: None,
            timeout_seconds: default_timeout(),
            accept_invalid_certs: false,
            ca_cert: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub file_enabled: bool,

    #[serde(default = "default_log_directory")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_enabled: false,
            directory: default_log_directory(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_log_directory() -> String {
    "~/.access-webhooks/logs".to_string()
}

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".access-webhooks"))
        .unwrap_or_else(|| PathBuf::from(".access-webhooks"))
}

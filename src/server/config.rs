//! Configuration loading for animangad.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.animanga/config.toml` (user)
//! 3. `/etc/animanga/config.toml` (system)
//!
//! When none of these exist the built-in defaults are used, which talk to
//! the public Jikan API on port 3003. The `PORT` environment variable
//! overrides the port of `server.address`.

use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::gateway::{Animanga, GatewayBuilder};
use crate::upstream::{DEFAULT_BASE_URL, RateGateConfig};
use crate::{AnimangaError, Result};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3003).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:3003".to_string()
}

/// Upstream API access.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Jikan base URL (default: https://api.jikan.moe/v4).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP timeout per call in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Minimum spacing between calls in milliseconds (default: 400).
    #[serde(default = "default_min_interval")]
    pub min_interval_ms: u64,
    /// Pause after a 429 in milliseconds (default: 2000).
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u64,
    /// Give up after this many 429s. Unset retries forever.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            min_interval_ms: default_min_interval(),
            cooldown_ms: default_cooldown(),
            max_retries: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_min_interval() -> u64 {
    400
}

fn default_cooldown() -> u64 {
    2000
}

/// Response cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Freshness window in seconds (default: 300).
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Optional capacity bound. Unset keeps every entry.
    #[serde(default)]
    pub max_entries: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: None,
        }
    }
}

fn default_ttl() -> u64 {
    300
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first existing file
    /// among the user and system locations is used, else the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AnimangaError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            AnimangaError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(AnimangaError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".animanga").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/animanga/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Address to bind, with `port` (the `PORT` variable) replacing the
    /// configured port when set.
    pub fn bind_address(&self, port: Option<&str>) -> Result<SocketAddr> {
        let mut addr: SocketAddr = self.server.address.parse().map_err(|e| {
            AnimangaError::Configuration(format!(
                "Invalid address {:?}: {e}",
                self.server.address
            ))
        })?;
        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            let port: u16 = port
                .parse()
                .map_err(|e| AnimangaError::Configuration(format!("Invalid PORT {port:?}: {e}")))?;
            addr.set_port(port);
        }
        Ok(addr)
    }

    pub fn rate_gate_config(&self) -> RateGateConfig {
        RateGateConfig {
            min_interval: Duration::from_millis(self.upstream.min_interval_ms),
            cooldown: Duration::from_millis(self.upstream.cooldown_ms),
            max_retries: self.upstream.max_retries,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache.ttl_secs),
            max_entries: self.cache.max_entries,
        }
    }

    /// Gateway builder carrying every upstream and cache setting.
    pub fn gateway_builder(&self) -> GatewayBuilder {
        Animanga::builder()
            .base_url(&self.upstream.base_url)
            .timeout(Duration::from_secs(self.upstream.timeout_secs))
            .rate_gate(self.rate_gate_config())
            .cache(self.cache_config())
    }
}

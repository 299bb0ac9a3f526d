//! Configuration type definitions
//!
//! Configuration is built once at startup and handed to the controller by
//! value. Platforms may deserialize it from TOML with the `serde` feature.

use core::fmt;
use core::net::Ipv4Addr;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tempwatch_hal::net::DEFAULT_TIMEOUT_MS;

/// Maximum host length (dotted-quad IPv4 literal)
pub const MAX_HOST_LEN: usize = 32;

/// Maximum request path length
pub const MAX_PATH_LEN: usize = 128;

/// Default refresh interval in ticks (about one second)
pub const DEFAULT_REFRESH_TICKS: u32 = 60;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Host is not an IPv4 literal
    InvalidHost,
    /// Port is zero
    InvalidPort,
    /// Path is empty or does not start with `/`
    InvalidPath,
    /// Refresh interval is zero
    ZeroRefreshInterval,
    /// A timeout is zero
    ZeroTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConfigError::InvalidHost => "server host must be a dotted-quad IPv4 address",
            ConfigError::InvalidPort => "server port must be non-zero",
            ConfigError::InvalidPath => "server path must start with '/'",
            ConfigError::ZeroRefreshInterval => "refresh interval must be at least one tick",
            ConfigError::ZeroTimeout => "timeouts must be non-zero",
        };
        f.write_str(text)
    }
}

/// Report endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServerConfig {
    /// IPv4 literal of the report server
    pub host: String<MAX_HOST_LEN>,
    /// TCP port
    pub port: u16,
    /// Request path
    pub path: String<MAX_PATH_LEN>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mut host = String::new();
        let _ = host.push_str("192.168.1.35");
        let mut path = String::new();
        let _ = path.push_str("/api/temps/simple");
        Self {
            host,
            port: 5000,
            path,
        }
    }
}

/// Socket timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeoutConfig {
    /// Send timeout in milliseconds
    pub send_ms: u32,
    /// Receive timeout in milliseconds
    pub recv_ms: u32,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            send_ms: DEFAULT_TIMEOUT_MS,
            recv_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Report endpoint
    pub server: ServerConfig,
    /// Ticks between automatic refreshes
    pub refresh_interval_ticks: u32,
    /// Socket timeouts
    pub timeouts: TimeoutConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            refresh_interval_ticks: DEFAULT_REFRESH_TICKS,
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Check that the configuration can drive a poll
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .host
            .parse::<Ipv4Addr>()
            .map_err(|_| ConfigError::InvalidHost)?;

        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if !self.server.path.starts_with('/') {
            return Err(ConfigError::InvalidPath);
        }

        if self.refresh_interval_ticks == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }

        if self.timeouts.send_ms == 0 || self.timeouts.recv_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

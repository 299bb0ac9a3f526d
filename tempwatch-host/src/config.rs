//! Monitor configuration loading
//!
//! The configuration is embedded at build time from `monitor.toml`; the
//! build script has already rejected invalid files, so the runtime check
//! only guards against drift between the two validators.

use log::{error, info};
use tempwatch_core::{ConfigError, MonitorConfig};
use thiserror::Error;

/// Configuration compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../monitor.toml");

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum HostConfigError {
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(ConfigError),
}

/// Parse and validate a TOML configuration
pub fn parse_config(text: &str) -> Result<MonitorConfig, HostConfigError> {
    let config: MonitorConfig = toml::from_str(text)?;
    config.validate().map_err(HostConfigError::Invalid)?;
    Ok(config)
}

/// The embedded configuration, or defaults if it is unusable
pub fn embedded_config() -> MonitorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "using embedded configuration: {}:{}{} every {} ticks",
                config.server.host.as_str(),
                config.server.port,
                config.server.path.as_str(),
                config.refresh_interval_ticks
            );
            config
        }
        Err(e) => {
            error!("{}; falling back to defaults", e);
            MonitorConfig::default()
        }
    }
}

//! Build script for tempwatch-host
//!
//! Validates monitor.toml at compile time so a bad address or path fails the
//! build instead of the first poll.

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

fn main() {
    validate_config();
}

/// Validate monitor.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=monitor.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("monitor.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&format!("cannot read monitor.toml: {}", e)),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&format!("invalid TOML syntax in monitor.toml:\n{}", e)),
    };

    let mut errors = Vec::new();
    validate_server(&config, &mut errors);
    validate_positive(&config, None, "refresh_interval_ticks", &mut errors);
    validate_positive(&config, Some("timeouts"), "send_ms", &mut errors);
    validate_positive(&config, Some("timeouts"), "recv_ms", &mut errors);

    if !errors.is_empty() {
        fail(&errors.join("\n"));
    }
}

/// Validate the [server] section
fn validate_server(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(server) = config.get("server") else {
        return;
    };

    if let Some(host) = server.get("host") {
        match host.as_str() {
            Some(text) if text.parse::<Ipv4Addr>().is_ok() => {}
            _ => errors.push(format!(
                "[server].host must be a dotted-quad IPv4 address, got {}",
                host
            )),
        }
    }

    if let Some(port) = server.get("port") {
        match port.as_integer() {
            Some(p) if (1..=65535).contains(&p) => {}
            _ => errors.push(format!("[server].port must be in 1..=65535, got {}", port)),
        }
    }

    if let Some(path) = server.get("path") {
        match path.as_str() {
            Some(text) if text.starts_with('/') => {}
            _ => errors.push(format!("[server].path must start with '/', got {}", path)),
        }
    }
}

/// Validate that an optional integer key is positive
fn validate_positive(
    config: &toml::Value,
    section: Option<&str>,
    key: &str,
    errors: &mut Vec<String>,
) {
    let table = match section {
        Some(name) => config.get(name),
        None => Some(config),
    };
    let Some(value) = table.and_then(|t| t.get(key)) else {
        return;
    };

    match value.as_integer() {
        Some(v) if v > 0 && v <= i64::from(u32::MAX) => {}
        _ => {
            let name = match section {
                Some(s) => format!("[{}].{}", s, key),
                None => key.to_string(),
            };
            errors.push(format!("{} must be a positive integer, got {}", name, value));
        }
    }
}

fn fail(message: &str) -> ! {
    panic!(
        "\n\
        ==================================================================\n\
        ERROR: monitor.toml is not valid\n\
        ------------------------------------------------------------------\n\
        {}\n\
        ==================================================================\n",
        message
    );
}

//! Desktop platform for the temperature monitor
//!
//! Implements the platform traits with `std`:
//!
//! - [`net::StdTcpTransport`] - blocking TCP over `std::net`
//! - [`console::AnsiConsole`] - 32-column console with ANSI colors
//! - [`input::LineButtons`] - confirm/exit commands read from a terminal
//! - [`vsync::VblankTimer`] - thread advancing the frame clock at 60 Hz
//!
//! Logs go to stderr through `env_logger` so they do not mix with the
//! console on stdout.

pub mod config;
pub mod console;
pub mod input;
pub mod net;
pub mod vsync;

pub use config::{embedded_config, parse_config, HostConfigError, EMBEDDED_CONFIG};
pub use console::AnsiConsole;
pub use input::{parse_command, LineButtons};
pub use net::StdTcpTransport;
pub use vsync::{FrameWaiter, VblankTimer};

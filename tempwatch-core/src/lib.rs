//! Board-agnostic core logic for the temperature monitor
//!
//! This crate contains all application logic that does not depend on a
//! specific platform:
//!
//! - Frame clock shared with the vertical-sync interrupt
//! - Monitor configuration types and validation
//! - State machine for the polling client
//! - Temperature report and diagnostic screen rendering
//! - Controller driving one poll cycle per control-loop iteration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod clock;
pub mod config;
pub mod controller;
pub mod render;
pub mod screens;
pub mod state;

pub use clock::{FrameClock, Tick, FRAME_RATE_HZ};
pub use config::{ConfigError, MonitorConfig, ServerConfig, TimeoutConfig};
pub use controller::{check_body, AppController, MIN_BODY_LEN};
pub use render::{SeverityTier, TemperatureRenderer};
pub use state::{Event, ParseFailure, State};

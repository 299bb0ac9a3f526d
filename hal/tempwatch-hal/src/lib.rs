//! Tempwatch Hardware Abstraction Layer
//!
//! This crate defines the platform traits the polling client is written
//! against. The handheld port and the desktop host each provide their own
//! implementations, so the same client logic runs on both.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tempwatch-core)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tempwatch-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   handheld    │       │ tempwatch-    │
//! │   platform    │       │    host       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`net::NetworkTransport`] - Blocking, timeout-bounded TCP-style transport
//! - [`vsync::VerticalSync`] - Wait for the next display refresh

#![no_std]
#![deny(unsafe_code)]

pub mod net;
pub mod vsync;

pub use net::{NetworkTransport, TransportError, DEFAULT_TIMEOUT_MS};
pub use vsync::VerticalSync;

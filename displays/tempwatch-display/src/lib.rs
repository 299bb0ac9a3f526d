//! Console and input abstractions for tempwatch
//!
//! This crate provides:
//! - `ConsoleBackend` trait for text consoles that can write styled lines
//! - `InputSource` trait for sampling the held buttons
//! - `ButtonTracker` to turn held-button samples into discrete presses
//! - `Screen`, a recording console used by tests and by hosts that diff frames
//!
//! # Architecture
//!
//! The client never touches cursor positioning or color escape sequences.
//! It writes whole lines tagged with a [`Style`]; each backend translates the
//! style into whatever its console understands and resets it after the line.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod input;
pub mod screen;

// Re-export key types
pub use backend::{clip, ConsoleBackend, ConsoleExt, DisplayError, Style};
pub use input::{ButtonTracker, Buttons, InputSource, NavigationEvent};
pub use screen::{Screen, ScreenLine, LINE_LEN, SCREEN_COLS, SCREEN_LINES};

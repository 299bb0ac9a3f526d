//! Configuration types
//!
//! Board-agnostic monitor configuration with validation.

pub mod types;

pub use types::*;

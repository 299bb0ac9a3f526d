//! State machine for the polling client
//!
//! The state machine is explicit, finite, and deterministic. Side effects
//! (fetching, rendering) belong to the controller; this module only decides
//! which state follows which event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ParseFailure, State};

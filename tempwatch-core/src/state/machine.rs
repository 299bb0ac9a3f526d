//! State machine definition
//!
//! Display contents and polling are a function of the current state and an
//! event.

use core::fmt;

use tempwatch_protocol::FetchError;

use super::events::Event;

/// Client states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Start prompt, waiting for confirm
    Welcome,
    /// Poll in progress
    Connecting,
    /// Report shown
    Displaying,
    /// Last fetch failed
    ConnectError(FetchError),
    /// Last response had no usable body
    ParseError(ParseFailure),
    /// Exit requested; the control loop stops
    Shutdown,
}

/// Why a successful fetch could not be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseFailure {
    /// Neither header/body separator was found
    NoBodyBoundary,
    /// The body was present but too short to hold a record
    BodyTooShort(usize),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::NoBodyBoundary => f.write_str("HTTP body not found"),
            ParseFailure::BodyTooShort(len) => write!(f, "Body too short: {} chars", len),
        }
    }
}

impl State {
    /// Check if this state shows a poll result
    ///
    /// Only these states react to a refresh.
    pub fn shows_result(&self) -> bool {
        matches!(
            self,
            State::Displaying | State::ConnectError(_) | State::ParseError(_)
        )
    }

    /// Check if the control loop should stop
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Shutdown)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Shutdown, _) => Shutdown,
            (_, Exit) => Shutdown,

            // Welcome transitions
            (Welcome, Start) => Connecting,

            // Poll outcomes
            (Connecting, BodyReady) => Displaying,
            (Connecting, FetchFailed(kind)) => ConnectError(kind),
            (Connecting, ParseFailed(failure)) => ParseError(failure),

            // Result states
            (Displaying | ConnectError(_) | ParseError(_), Refresh) => Connecting,

            // Default: stay in current state
            _ => self,
        }
    }
}

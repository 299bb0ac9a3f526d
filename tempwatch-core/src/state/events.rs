//! Events that trigger state transitions

use tempwatch_protocol::FetchError;

use super::machine::ParseFailure;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User events
    /// Confirm pressed on the welcome screen
    Start,
    /// Confirm pressed, or the refresh interval elapsed
    Refresh,
    /// Exit pressed
    Exit,

    // Poll outcomes
    /// Response carried a usable body
    BodyReady,
    /// The fetch itself failed
    FetchFailed(FetchError),
    /// The fetch succeeded but the body was unusable
    ParseFailed(ParseFailure),
}

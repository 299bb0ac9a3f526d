//! Vertical-sync pacing

/// Display refresh pacing
///
/// The control loop runs one iteration per display refresh. Implementations
/// block until the next vertical-sync event has been observed.
pub trait VerticalSync {
    /// Block until the next vertical-sync event
    fn wait_for_vblank(&mut self);
}

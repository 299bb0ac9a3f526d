//! Button input abstraction
//!
//! Platforms report which buttons are currently held. The client only acts
//! on presses, so [`ButtonTracker`] compares successive samples and yields a
//! [`NavigationEvent`] on the sample where a button goes down.

use core::ops::{BitAnd, BitOr, Not};

/// Set of logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// No buttons
    pub const NONE: Self = Self(0);
    /// Confirm: start the connection, or refresh immediately
    pub const CONFIRM: Self = Self(1 << 0);
    /// Exit: leave the application
    pub const EXIT: Self = Self(1 << 1);

    /// Build a set from raw bits, ignoring unknown buttons
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & (Self::CONFIRM.0 | Self::EXIT.0))
    }

    /// Check whether every button in `other` is in this set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Check whether the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits_truncate(!self.0)
    }
}

/// Discrete input event derived from a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// Confirm was pressed
    Confirm,
    /// Exit was pressed
    Exit,
}

/// Source of held-button samples
pub trait InputSource {
    /// Sample the buttons currently held down
    fn held(&mut self) -> Buttons;
}

/// Edge detector over held-button samples
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    previous: Buttons,
}

impl ButtonTracker {
    /// Create a tracker with no buttons held
    pub const fn new() -> Self {
        Self {
            previous: Buttons::NONE,
        }
    }

    /// Record a sample and return the buttons that went down since the last one
    pub fn pressed(&mut self, held: Buttons) -> Buttons {
        let pressed = held & !self.previous;
        self.previous = held;
        pressed
    }

    /// Record a sample and return the resulting event, if any
    ///
    /// Exit wins when both buttons go down on the same sample.
    pub fn scan(&mut self, held: Buttons) -> Option<NavigationEvent> {
        let pressed = self.pressed(held);
        if pressed.contains(Buttons::EXIT) {
            Some(NavigationEvent::Exit)
        } else if pressed.contains(Buttons::CONFIRM) {
            Some(NavigationEvent::Confirm)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_reported_once_while_held() {
        let mut tracker = ButtonTracker::new();
        assert_eq!(tracker.scan(Buttons::CONFIRM), Some(NavigationEvent::Confirm));
        assert_eq!(tracker.scan(Buttons::CONFIRM), None);
        assert_eq!(tracker.scan(Buttons::CONFIRM), None);
    }

    #[test]
    fn test_release_then_press_again() {
        let mut tracker = ButtonTracker::new();
        assert!(tracker.scan(Buttons::CONFIRM).is_some());
        assert_eq!(tracker.scan(Buttons::NONE), None);
        assert_eq!(tracker.scan(Buttons::CONFIRM), Some(NavigationEvent::Confirm));
    }

    #[test]
    fn test_exit_wins_over_confirm() {
        let mut tracker = ButtonTracker::new();
        let both = Buttons::CONFIRM | Buttons::EXIT;
        assert_eq!(tracker.scan(both), Some(NavigationEvent::Exit));
    }

    #[test]
    fn test_exit_while_confirm_held() {
        let mut tracker = ButtonTracker::new();
        tracker.scan(Buttons::CONFIRM);
        assert_eq!(
            tracker.scan(Buttons::CONFIRM | Buttons::EXIT),
            Some(NavigationEvent::Exit)
        );
    }

    #[test]
    fn test_unknown_bits_ignored() {
        let buttons = Buttons::from_bits_truncate(0xFF);
        assert_eq!(buttons, Buttons::CONFIRM | Buttons::EXIT);
        assert!(!Buttons::NONE.contains(Buttons::NONE));
    }
}

//! Frame clock
//!
//! A tick counter advanced once per vertical-sync event. The interrupt
//! handler is the only writer; the control loop reads it to decide when the
//! next refresh is due. No wall clock is involved.

use portable_atomic::{AtomicU32, Ordering};

/// One vertical-sync period
pub type Tick = u32;

/// Nominal vertical-sync rate of the handheld display
pub const FRAME_RATE_HZ: u32 = 60;

/// Monotonic tick counter shared with interrupt context
#[derive(Debug)]
pub struct FrameClock {
    ticks: AtomicU32,
}

impl FrameClock {
    /// Create a clock at tick zero
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Advance the clock by one tick
    ///
    /// Called from the vertical-sync handler. There is a single writer, so
    /// a load/store pair is enough and no read-modify-write is needed.
    pub fn tick(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Release);
    }

    /// Current tick count
    pub fn now(&self) -> Tick {
        self.ticks.load(Ordering::Acquire)
    }

    /// Ticks elapsed since `mark`
    pub fn elapsed_since(&self, mark: Tick) -> Tick {
        self.now().wrapping_sub(mark)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Approximate wall time of `ticks`, in whole seconds
pub fn ticks_to_secs(ticks: Tick) -> u32 {
    ticks.saturating_add(FRAME_RATE_HZ / 2) / FRAME_RATE_HZ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.elapsed_since(0), 0);
    }

    #[test]
    fn test_tick_advances() {
        let clock = FrameClock::new();
        let mark = clock.now();
        for _ in 0..60 {
            clock.tick();
        }
        assert_eq!(clock.now(), 60);
        assert_eq!(clock.elapsed_since(mark), 60);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let clock = FrameClock {
            ticks: AtomicU32::new(u32::MAX - 1),
        };
        let mark = clock.now();
        clock.tick();
        clock.tick();
        clock.tick();
        assert_eq!(clock.now(), 1);
        assert_eq!(clock.elapsed_since(mark), 3);
    }

    #[test]
    fn test_shared_with_other_thread() {
        static CLOCK: FrameClock = FrameClock::new();

        let writer = std::thread::spawn(|| {
            for _ in 0..1000 {
                CLOCK.tick();
            }
        });

        let mut last = 0;
        while !writer.is_finished() {
            let now = CLOCK.now();
            assert!(now >= last);
            last = now;
        }
        writer.join().unwrap();
        assert_eq!(CLOCK.now(), 1000);
    }

    #[test]
    fn test_ticks_to_secs() {
        assert_eq!(ticks_to_secs(60), 1);
        assert_eq!(ticks_to_secs(20), 0);
        assert_eq!(ticks_to_secs(90), 2);
        assert_eq!(ticks_to_secs(300), 5);
    }
}

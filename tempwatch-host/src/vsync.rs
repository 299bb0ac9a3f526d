//! Vertical-sync emulation
//!
//! A background thread stands in for the display interrupt: it advances the
//! frame clock at a fixed rate. The control loop waits on the clock to pace
//! itself to one iteration per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::debug;
use tempwatch_core::{FrameClock, Tick, FRAME_RATE_HZ};
use tempwatch_hal::VerticalSync;

/// Polling step while waiting for the next tick
const WAIT_STEP: Duration = Duration::from_millis(1);

/// Thread advancing a frame clock at a fixed rate
#[derive(Debug)]
pub struct VblankTimer {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl VblankTimer {
    /// Start ticking `clock` at the handheld's frame rate
    pub fn start(clock: &'static FrameClock) -> Self {
        Self::with_rate(clock, FRAME_RATE_HZ)
    }

    /// Start ticking `clock` at `rate_hz`
    pub fn with_rate(clock: &'static FrameClock, rate_hz: u32) -> Self {
        let period = Duration::from_secs(1) / rate_hz.max(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            debug!("vblank timer started, period {:?}", period);
            let mut next = Instant::now() + period;
            while !stop_flag.load(Ordering::Relaxed) {
                let now = Instant::now();
                if now < next {
                    thread::sleep(next - now);
                }
                clock.tick();
                next += period;
            }
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }
}

impl Drop for VblankTimer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Waits for the frame clock to advance
#[derive(Debug)]
pub struct FrameWaiter<'c> {
    clock: &'c FrameClock,
    last: Tick,
}

impl<'c> FrameWaiter<'c> {
    /// Create a waiter starting at the clock's current tick
    pub fn new(clock: &'c FrameClock) -> Self {
        Self {
            clock,
            last: clock.now(),
        }
    }
}

impl VerticalSync for FrameWaiter<'_> {
    fn wait_for_vblank(&mut self) {
        while self.clock.now() == self.last {
            thread::sleep(WAIT_STEP);
        }
        self.last = self.clock.now();
    }
}

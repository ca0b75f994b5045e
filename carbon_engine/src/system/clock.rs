/// Time sources for resource bookkeeping.
///
/// Garbage deadlines, last-referenced stamps and delayed messages are all
/// expressed in seconds as `f64`, read from a shared `Clock`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic time source (seconds)
pub trait Clock: Send + Sync {
    /// Current time in seconds
    fn now(&self) -> f64;
}

/// Wall-clock time elapsed since construction
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Externally driven clock
///
/// Time only moves when `set` or `advance` is called. Used for fixed-step
/// simulation and deterministic tests.
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading `start` seconds
    pub fn new(start: f64) -> Self {
        Self { bits: AtomicU64::new(start.to_bits()) }
    }

    /// Jump to an absolute time
    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::SeqCst);
    }

    /// Move forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        let now = self.now();
        self.set(now + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

//! Wall-clock time sources

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic timestamp in nanoseconds since an arbitrary origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(pub u64);

/// Seconds from `t0` to `t1` (zero if `t1` is earlier)
pub fn elapsed_seconds(t0: Timestamp, t1: Timestamp) -> f64 {
    t1.0.saturating_sub(t0.0) as f64 / 1e9
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Real monotonic clock
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_nanos() as u64)
    }
}

/// Clock advanced by hand; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, t: Timestamp) {
        self.nanos.set(t.0);
    }

    pub fn advance_secs(&self, secs: f64) {
        let step = (secs * 1e9).round() as u64;
        self.nanos.set(self.nanos.get() + step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.nanos.get())
    }
}

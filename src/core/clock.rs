//=========================================================================
// Clock
//=========================================================================
//
// Monotonic millisecond time source shared by every scene.
//
// All timing decisions (star cadence, spawn curve, transition delays,
// count-up animation) sample `now_millis()` at well-defined points in a
// frame, so a scene never observes time moving mid-comparison.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

//=== Clock Trait =========================================================

/// Source of monotonic milliseconds since the clock was created.
pub trait Clock: Send {
    fn now_millis(&self) -> u64;
}

//=== SystemClock =========================================================

/// Wall clock backed by [`Instant`], starting at zero on construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

//=== ManualClock =========================================================

/// Hand-driven clock for deterministic simulation.
///
/// Clones share the same counter, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            ticks: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.ticks.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.ticks.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//! Cooperative frame scheduling.
//!
//! A [`FrameLoop`] holds at most one pending frame.  Requesting a new frame
//! replaces the old handle, so a restart can never leave two tick chains
//! running.  Front ends drive it with a [`FramePacer`]; tests drive it by
//! calling into the session directly with a [`ManualClock`].

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Identifies one scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(u64);

#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next frame, superseding any frame already pending.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Cancel the pending frame, if any.
    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending frame for execution.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

// ── Clocks ───────────────────────────────────────────────────────────────────

/// Monotonic milliseconds, used for the fire cooldown.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        ManualClock { now: Cell::new(start_ms) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── Pacing ───────────────────────────────────────────────────────────────────

/// Sleeps until the next frame boundary.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        FramePacer { interval, frame_start: Instant::now() }
    }

    /// Block for whatever is left of the current frame, then start the next.
    /// A frame that overran is not made up for.
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

use std::time::{Duration, Instant};

use space_invader::scheduler::*;

#[test]
fn request_replaces_the_pending_frame() {
    let mut frames = FrameLoop::new();
    assert!(!frames.is_pending());

    let a = frames.request();
    let b = frames.request();
    assert_ne!(a, b);
    assert_eq!(frames.pending(), Some(b));
}

#[test]
fn take_due_consumes_once() {
    let mut frames = FrameLoop::new();
    let h = frames.request();
    assert_eq!(frames.take_due(), Some(h));
    assert_eq!(frames.take_due(), None);
}

#[test]
fn cancel_drops_the_pending_frame() {
    let mut frames = FrameLoop::new();
    let h = frames.request();
    assert_eq!(frames.cancel(), Some(h));
    assert!(!frames.is_pending());
    assert_eq!(frames.cancel(), None);
    assert_eq!(frames.take_due(), None);
}

#[test]
fn manual_clock_moves_only_when_told() {
    let clock = ManualClock::new(10);
    assert_eq!(clock.now_ms(), 10);
    clock.advance(240);
    assert_eq!(clock.now_ms(), 250);
    clock.set(5);
    assert_eq!(clock.now_ms(), 5);
}

#[test]
fn monotonic_clock_never_goes_back() {
    let clock = MonotonicClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
}

#[test]
fn pacer_waits_out_the_frame() {
    let mut pacer = FramePacer::new(Duration::from_millis(20));
    let start = Instant::now();
    pacer.wait();
    assert!(start.elapsed() >= Duration::from_millis(15));
}

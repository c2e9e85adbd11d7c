//! "Run this on the next paint" scheduling.
//!
//! Opening a submenu defers placement until the next frame so layout (the
//! trigger row rect and the viewport) is current. Interactive terminals get a
//! frame scheduler whose callbacks run right before the next draw; headless
//! hosts fall back to a zero-delay timer.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use crate::document::HandlerId;
use crate::timers::{TimerKind, TimerQueue};

pub trait PaintScheduler: std::fmt::Debug {
    fn schedule(&mut self, owner: HandlerId, timers: &mut TimerQueue, now: Instant);

    fn cancel(&mut self, owner: HandlerId, timers: &mut TimerQueue);

    /// Owners whose callbacks are due at the start of a frame.
    fn take_frame(&mut self) -> Vec<HandlerId>;
}

/// Runs callbacks at the start of the next rendered frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Vec<HandlerId>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaintScheduler for FrameScheduler {
    fn schedule(&mut self, owner: HandlerId, _timers: &mut TimerQueue, _now: Instant) {
        if !self.pending.contains(&owner) {
            self.pending.push(owner);
        }
    }

    fn cancel(&mut self, owner: HandlerId, _timers: &mut TimerQueue) {
        self.pending.retain(|h| *h != owner);
    }

    fn take_frame(&mut self) -> Vec<HandlerId> {
        std::mem::take(&mut self.pending)
    }
}

/// Fallback: a zero-delay timer delivered on the next tick.
#[derive(Debug, Default)]
pub struct TimeoutScheduler;

impl PaintScheduler for TimeoutScheduler {
    fn schedule(&mut self, owner: HandlerId, timers: &mut TimerQueue, now: Instant) {
        timers.cancel_owned(owner, TimerKind::Paint);
        timers.schedule(now, Duration::ZERO, owner, TimerKind::Paint);
    }

    fn cancel(&mut self, owner: HandlerId, timers: &mut TimerQueue) {
        timers.cancel_owned(owner, TimerKind::Paint);
    }

    fn take_frame(&mut self) -> Vec<HandlerId> {
        Vec::new()
    }
}

/// Pick the frame scheduler when stdout is a terminal that will be redrawn,
/// the timer fallback otherwise.
pub fn detect_paint_scheduler() -> Box<dyn PaintScheduler> {
    if std::io::stdout().is_terminal() {
        Box::new(FrameScheduler::new())
    } else {
        Box::new(TimeoutScheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_scheduler_dedups_and_drains() {
        let mut timers = TimerQueue::new();
        let mut s = FrameScheduler::new();
        let a = HandlerId::next();
        let now = Instant::now();
        s.schedule(a, &mut timers, now);
        s.schedule(a, &mut timers, now);
        assert_eq!(s.take_frame(), vec![a]);
        assert!(s.take_frame().is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn timeout_scheduler_uses_zero_delay_timer() {
        let mut timers = TimerQueue::new();
        let mut s = TimeoutScheduler;
        let a = HandlerId::next();
        let now = Instant::now();
        s.schedule(a, &mut timers, now);
        assert!(s.take_frame().is_empty());
        let due = timers.take_due(now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, TimerKind::Paint);

        s.schedule(a, &mut timers, now);
        s.cancel(a, &mut timers);
        assert!(timers.is_empty());
    }
}

//! One-shot timers driven by the host loop.
//!
//! Nothing here spawns threads or sleeps: the host calls `take_due(now)` on
//! every tick and routes each returned wakeup to its owner.

use std::time::{Duration, Instant};

use crate::document::HandlerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    HoverOpen,
    HoverClose,
    Paint,
    TransitionEnd,
}

/// A fired timer, addressed to the menu that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wakeup {
    pub owner: HandlerId,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: TimerId,
    deadline: Instant,
    wakeup: Wakeup,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        owner: HandlerId,
        kind: TimerKind,
    ) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(Entry {
            id,
            deadline: now + delay,
            wakeup: Wakeup { owner, kind },
        });
        id
    }

    /// Cancel `id`. Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Cancel every pending timer of `kind` owned by `owner`.
    pub fn cancel_owned(&mut self, owner: HandlerId, kind: TimerKind) {
        self.entries
            .retain(|e| !(e.wakeup.owner == owner && e.wakeup.kind == kind));
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first. Timers with equal deadlines keep scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<Wakeup> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.deadline, e.id.0));
        due.into_iter().map(|e| e.wakeup).collect()
    }

    /// Earliest pending deadline, useful for sizing the next poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn pending_for(&self, owner: HandlerId) -> usize {
        self.entries.iter().filter(|e| e.wakeup.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

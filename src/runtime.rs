//! Shared services every menu in a tree talks to.
//!
//! `MenuRuntime` bundles the document listener registry, the global
//! dispatcher, timers, the next-paint scheduler, panel transitions and the
//! message queue. It is created once per host and passed by `&mut` into menu
//! operations; nothing in the crate reaches for ambient globals.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::MenuData;
use crate::document::{Document, HandlerId};
use crate::geometry::ViewportExtent;
use crate::global_listener::{ClickOutsideListener, GlobalListener};
use crate::paint::{PaintScheduler, TimeoutScheduler, detect_paint_scheduler};
use crate::timers::{TimerId, TimerKind, TimerQueue, Wakeup};

/// Requests a menu posts for its owner to act on after the current dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMessage {
    /// A force-opened submenu hid itself; its owner should drop the override.
    ForceClose(HandlerId),
    /// An item was activated; the whole menu tree should close.
    HideAll,
}

#[derive(Debug)]
pub struct MenuRuntime {
    now: Instant,
    viewport: ViewportExtent,
    document: Document,
    global: Box<dyn GlobalListener>,
    timers: TimerQueue,
    paint: Box<dyn PaintScheduler>,
    messages: VecDeque<MenuMessage>,
    store: MenuData,
}

impl MenuRuntime {
    pub fn new(
        global: Box<dyn GlobalListener>,
        paint: Box<dyn PaintScheduler>,
        now: Instant,
    ) -> Self {
        Self {
            now,
            viewport: ViewportExtent::default(),
            document: Document::new(),
            global,
            timers: TimerQueue::new(),
            paint,
            messages: VecDeque::new(),
            store: MenuData::new(),
        }
    }

    /// Runtime for an interactive terminal host.
    pub fn detect(now: Instant) -> Self {
        Self::new(
            Box::new(ClickOutsideListener::new()),
            detect_paint_scheduler(),
            now,
        )
    }

    /// Runtime with timer-based paint scheduling, for tests and headless use.
    pub fn headless(now: Instant) -> Self {
        Self::new(
            Box::new(ClickOutsideListener::new()),
            Box::new(TimeoutScheduler),
            now,
        )
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the clock forward. Going backwards is ignored.
    pub fn set_now(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn viewport(&self) -> ViewportExtent {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportExtent) {
        self.viewport = viewport;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn global(&self) -> &dyn GlobalListener {
        self.global.as_ref()
    }

    pub fn global_mut(&mut self) -> &mut dyn GlobalListener {
        self.global.as_mut()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn schedule(&mut self, owner: HandlerId, delay: Duration, kind: TimerKind) -> TimerId {
        self.timers.schedule(self.now, delay, owner, kind)
    }

    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub fn request_paint(&mut self, owner: HandlerId) {
        self.paint.schedule(owner, &mut self.timers, self.now);
    }

    pub fn cancel_paint(&mut self, owner: HandlerId) {
        self.paint.cancel(owner, &mut self.timers);
    }

    /// Owners with a paint callback due on the frame about to be drawn.
    pub fn take_frame(&mut self) -> Vec<HandlerId> {
        self.paint.take_frame()
    }

    /// Start (or restart) the panel transition of `owner`.
    ///
    /// A zero duration runs no transition and so never signals its end.
    pub fn start_transition(&mut self, owner: HandlerId, duration: Duration) {
        self.timers.cancel_owned(owner, TimerKind::TransitionEnd);
        if !duration.is_zero() {
            self.timers
                .schedule(self.now, duration, owner, TimerKind::TransitionEnd);
        }
    }

    pub fn cancel_transition(&mut self, owner: HandlerId) {
        self.timers.cancel_owned(owner, TimerKind::TransitionEnd);
    }

    /// Advance the clock to `now` and collect every wakeup that is due.
    pub fn advance(&mut self, now: Instant) -> Vec<Wakeup> {
        self.set_now(now);
        self.timers.take_due(self.now)
    }

    pub fn post(&mut self, message: MenuMessage) {
        self.messages.push_back(message);
    }

    pub fn take_message(&mut self) -> Option<MenuMessage> {
        self.messages.pop_front()
    }

    /// Data attached to the trigger that opened the current context menu.
    pub fn store(&self) -> &MenuData {
        &self.store
    }

    pub fn set_store(&mut self, data: MenuData) {
        self.store = data;
    }

    /// Whether `owner` has nothing left pending or bound.
    pub fn is_released(&self, owner: HandlerId) -> bool {
        self.timers.pending_for(owner) == 0 && !self.document.is_bound(owner)
    }
}

//! Open/closed bookkeeping for a submenu.
//!
//! The transition logic is split in two: the hover debounce timers, which
//! only ever arm one of open/close at a time, and a pure predicate deciding
//! whether a change of `(visible, force_open)` is worth running an open or
//! close sequence for.

use std::time::Duration;

use crate::document::HandlerId;
use crate::runtime::MenuRuntime;
use crate::timers::{TimerId, TimerKind};

/// Inputs that together decide whether the panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityInputs {
    pub visible: bool,
    pub force_open: bool,
}

impl VisibilityInputs {
    pub const fn effectively_open(&self) -> bool {
        self.visible || self.force_open
    }
}

/// Whether moving from `prev` to `next` needs an open or close sequence.
///
/// Any flip of `visible` or `force_open` counts, except when the menu was
/// already visible and is now being forced open, or was forced open and is
/// now also visible. Both of those leave the panel as it is.
pub fn is_visibility_change(prev: VisibilityInputs, next: VisibilityInputs) -> bool {
    (prev.visible != next.visible || prev.force_open != next.force_open)
        && !(prev.visible && next.force_open)
        && !(prev.force_open && next.visible)
}

/// Where the panel is in its show/hide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPhase {
    Closed,
    /// Waiting for the next paint to place and reveal the panel.
    Opening,
    Open,
    /// Hidden, waiting for the transition end to restore the closed layout.
    Closing,
}

/// Hover debounce timers. At most one is pending at any time.
#[derive(Debug, Default)]
pub struct HoverTimers {
    open: Option<TimerId>,
    close: Option<TimerId>,
}

impl HoverTimers {
    pub fn arm_open(&mut self, owner: HandlerId, delay: Duration, rt: &mut MenuRuntime) {
        self.cancel_close(rt);
        self.cancel_open(rt);
        self.open = Some(rt.schedule(owner, delay, TimerKind::HoverOpen));
    }

    pub fn arm_close(&mut self, owner: HandlerId, delay: Duration, rt: &mut MenuRuntime) {
        self.cancel_open(rt);
        self.cancel_close(rt);
        self.close = Some(rt.schedule(owner, delay, TimerKind::HoverClose));
    }

    pub fn cancel_open(&mut self, rt: &mut MenuRuntime) {
        if let Some(id) = self.open.take() {
            rt.cancel_timer(id);
        }
    }

    pub fn cancel_close(&mut self, rt: &mut MenuRuntime) {
        if let Some(id) = self.close.take() {
            rt.cancel_timer(id);
        }
    }

    pub fn cancel_all(&mut self, rt: &mut MenuRuntime) {
        self.cancel_open(rt);
        self.cancel_close(rt);
    }

    /// Forget a timer that just fired.
    pub fn fired(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::HoverOpen => self.open = None,
            TimerKind::HoverClose => self.close = None,
            TimerKind::Paint | TimerKind::TransitionEnd => {}
        }
    }

    pub fn open_pending(&self) -> bool {
        self.open.is_some()
    }

    pub fn close_pending(&self) -> bool {
        self.close.is_some()
    }
}

//! Panel layout state and the open/close sequences that mutate it.
//!
//! `PanelStyle` stands in for the panel's inline style and its "visible"
//! marker. It is only written from here: the open sequence runs on the next
//! paint and applies a freshly resolved placement, the close sequence hides
//! the panel and restores the default layout once the hide transition ends.

use crate::geometry::{BoundingRect, PanelSize};
use crate::layout::placement::{Offset, Placement, resolve_placement};
use crate::runtime::MenuRuntime;

use super::SubMenu;
use super::visibility::is_visibility_change;

/// Inline offsets and markers of a submenu panel.
///
/// Offsets are relative to the trigger row box, which acts as the
/// positioned container: `top`/`left` measure from its top/left edge
/// downwards/rightwards, `bottom`/`right` from its bottom/right edge
/// upwards/leftwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    pub top: Option<Offset>,
    pub left: Option<Offset>,
    pub bottom: Option<Offset>,
    pub right: Option<Offset>,
    /// The "visible" marker; the panel is drawn only while set.
    pub visible: bool,
    /// One-shot cleanup armed by the close sequence.
    pub cleanup_on_transition_end: bool,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            top: Some(Offset::Cells(0)),
            left: Some(Offset::Percent(100)),
            bottom: None,
            right: None,
            visible: false,
            cleanup_on_transition_end: false,
        }
    }
}

impl PanelStyle {
    pub fn clear_offsets(&mut self) {
        self.top = None;
        self.left = None;
        self.bottom = None;
        self.right = None;
    }

    /// Copy only the keys present in `placement`.
    pub fn apply(&mut self, placement: &Placement) {
        if let Some(top) = placement.top() {
            self.top = Some(top);
        }
        if let Some(left) = placement.left() {
            self.left = Some(left);
        }
        if let Some(bottom) = placement.bottom() {
            self.bottom = Some(bottom);
        }
        if let Some(right) = placement.right() {
            self.right = Some(right);
        }
    }

    /// Restore the closed layout: `top: 0`, `left: 100%`, nothing else.
    pub fn restore_closed_layout(&mut self) {
        self.bottom = None;
        self.right = None;
        self.top = Some(Offset::Cells(0));
        self.left = Some(Offset::Percent(100));
    }

    /// Absolute panel box for a trigger row and a natural panel size.
    ///
    /// `top` wins over `bottom` and `left` over `right` when both are set;
    /// an axis with neither falls back to the trigger's top/left edge.
    pub fn resolve(&self, trigger: BoundingRect, size: PanelSize) -> BoundingRect {
        let top = match (self.top, self.bottom) {
            (Some(top), _) => trigger.top + top.resolve(trigger.height),
            (None, Some(bottom)) => trigger.bottom() - bottom.resolve(trigger.height) - size.height,
            (None, None) => trigger.top,
        };
        let left = match (self.left, self.right) {
            (Some(left), _) => trigger.left + left.resolve(trigger.width),
            (None, Some(right)) => trigger.right() - right.resolve(trigger.width) - size.width,
            (None, None) => trigger.left,
        };
        BoundingRect::new(left, top, size.width, size.height)
    }
}

impl SubMenu {
    /// Compare the current inputs with those seen last time and run the open
    /// or close sequence if the panel has to change.
    pub(crate) fn reconcile(&mut self, rt: &mut MenuRuntime) {
        let next = self.inputs();
        if is_visibility_change(self.last_inputs, next) {
            if next.effectively_open() {
                self.begin_open(rt);
            } else {
                self.begin_close(rt);
            }
        }
        self.last_inputs = next;
    }

    fn begin_open(&mut self, rt: &mut MenuRuntime) {
        // a close still waiting for its transition end must not undo this open
        self.style.cleanup_on_transition_end = false;
        self.paint_pending = true;
        rt.request_paint(self.id);
        tracing::debug!(menu = %self.id, title = %self.config.title, "submenu opening");
    }

    /// Next-paint half of the open sequence.
    pub(crate) fn on_paint(&mut self, rt: &mut MenuRuntime) {
        if !self.paint_pending {
            return;
        }
        self.paint_pending = false;
        rt.cancel_paint(self.id);
        let trigger = self.trigger_rect.unwrap_or_default();
        let placement = resolve_placement(
            trigger,
            self.list.natural_size(),
            rt.viewport(),
            self.config.rtl,
        );
        self.style.clear_offsets();
        self.style.apply(&placement);
        self.style.visible = true;
        rt.start_transition(self.id, self.config.transition);
        self.register_handlers(rt);
        self.list.clear_selection(rt);
        tracing::debug!(menu = %self.id, %placement, "submenu placed");
    }

    fn begin_close(&mut self, rt: &mut MenuRuntime) {
        if self.paint_pending {
            rt.cancel_paint(self.id);
            self.paint_pending = false;
        }
        if !self.style.visible {
            return;
        }
        self.style.visible = false;
        self.style.cleanup_on_transition_end = true;
        rt.start_transition(self.id, self.config.transition);
        tracing::debug!(menu = %self.id, title = %self.config.title, "submenu closing");
    }

    pub(crate) fn on_transition_end(&mut self, rt: &mut MenuRuntime) {
        if !self.style.cleanup_on_transition_end {
            return;
        }
        self.style.cleanup_on_transition_end = false;
        self.style.restore_closed_layout();
        self.unregister_handlers(rt);
        tracing::trace!(menu = %self.id, "close cleanup done");
    }
}

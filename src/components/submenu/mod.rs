//! Nested submenu: a trigger row inside a parent menu plus a panel of its own
//! entries that opens next to the trigger.
//!
//! Pointer hover opens and closes the panel after `hover_delay`; the owning
//! menu can also force it open (keyboard navigation). Every change to either
//! input goes through [`SubMenu::reconcile`], which only runs the open or
//! close sequence for genuine visibility changes.

mod bindings;
mod lifecycle;
pub mod visibility;

pub use lifecycle::PanelStyle;
pub use visibility::{VisibilityInputs, VisibilityPhase, is_visibility_change};

use crossterm::event::{Event, KeyEvent, MouseEvent};

use crate::components::menu_item::merge_data;
use crate::components::menu_list::{MenuEntry, MenuList, NavOutcome};
use crate::config::SubMenuConfig;
use crate::document::HandlerId;
use crate::geometry::{BoundingRect, PanelSize};
use crate::global_listener::ListenToken;
use crate::runtime::{MenuMessage, MenuRuntime};
use crate::timers::TimerKind;
use crate::ui::UiFrame;

use visibility::HoverTimers;

#[derive(Debug)]
pub struct SubMenu {
    id: HandlerId,
    pub(crate) config: SubMenuConfig,
    pub(crate) list: MenuList,
    visible: bool,
    last_inputs: VisibilityInputs,
    timers: HoverTimers,
    style: PanelStyle,
    paint_pending: bool,
    trigger_rect: Option<BoundingRect>,
    hovered: bool,
    pointer_on_trigger: bool,
    listen_token: Option<ListenToken>,
}

impl SubMenu {
    pub fn new(config: SubMenuConfig, entries: Vec<MenuEntry>) -> Self {
        let id = HandlerId::next();
        let mut list = MenuList::new(entries);
        list.adopt(id);
        let last_inputs = VisibilityInputs {
            visible: false,
            force_open: config.force_open,
        };
        Self {
            id,
            config,
            list,
            visible: false,
            last_inputs,
            timers: HoverTimers::default(),
            style: PanelStyle::default(),
            paint_pending: false,
            trigger_rect: None,
            hovered: false,
            pointer_on_trigger: false,
            listen_token: None,
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn config(&self) -> &SubMenuConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SubMenuConfig {
        &mut self.config
    }

    pub fn list(&self) -> &MenuList {
        &self.list
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Hover-driven visibility, independent of `force_open`.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_force_open(&self) -> bool {
        self.config.force_open
    }

    pub fn inputs(&self) -> VisibilityInputs {
        VisibilityInputs {
            visible: self.visible,
            force_open: self.config.force_open,
        }
    }

    pub fn phase(&self) -> VisibilityPhase {
        if self.paint_pending {
            VisibilityPhase::Opening
        } else if self.style.visible {
            VisibilityPhase::Open
        } else if self.style.cleanup_on_transition_end {
            VisibilityPhase::Closing
        } else {
            VisibilityPhase::Closed
        }
    }

    pub fn panel_style(&self) -> &PanelStyle {
        &self.style
    }

    /// Whether the panel carries the visible marker.
    pub fn is_panel_shown(&self) -> bool {
        self.style.visible
    }

    pub fn trigger_rect(&self) -> Option<BoundingRect> {
        self.trigger_rect
    }

    pub fn panel_rect(&self) -> Option<BoundingRect> {
        self.list.panel_rect()
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.list.selected()
    }

    pub fn natural_size(&self) -> PanelSize {
        self.list.natural_size()
    }

    pub fn open_timer_pending(&self) -> bool {
        self.timers.open_pending()
    }

    pub fn close_timer_pending(&self) -> bool {
        self.timers.close_pending()
    }

    pub fn is_mounted(&self) -> bool {
        self.listen_token.is_some()
    }

    /// Trigger row or, while shown, anywhere in the panel tree.
    pub fn contains(&self, column: i32, row: i32) -> bool {
        if self.trigger_rect.is_some_and(|r| r.contains(column, row)) {
            return true;
        }
        self.style.visible && self.list.contains(column, row)
    }

    /// Register with the click-outside dispatcher. Mounting twice is a no-op.
    pub fn mount(&mut self, rt: &mut MenuRuntime) {
        if self.listen_token.is_none() {
            self.register_global(rt);
        }
        self.list.mount_all(rt);
    }

    /// Cancel everything this submenu (and its children) still has pending,
    /// drop every registration and put the panel back in its closed layout.
    /// Safe to call repeatedly.
    pub fn unmount(&mut self, rt: &mut MenuRuntime) {
        self.list.unmount_all(rt);
        self.timers.cancel_all(rt);
        rt.cancel_paint(self.id);
        self.paint_pending = false;
        rt.cancel_transition(self.id);
        self.unregister_global(rt);
        self.unregister_handlers(rt);
        self.style = PanelStyle::default();
        self.visible = false;
        self.hovered = false;
        self.pointer_on_trigger = false;
        self.last_inputs = self.inputs();
        tracing::trace!(menu = %self.id, "submenu unmounted");
    }

    /// Pointer entered the trigger row or the panel.
    pub fn on_hover_enter(&mut self, rt: &mut MenuRuntime) {
        self.timers.cancel_close(rt);
        if self.config.disabled || self.visible {
            return;
        }
        self.timers.arm_open(self.id, self.config.hover_delay, rt);
        tracing::trace!(menu = %self.id, delay = ?self.config.hover_delay, "open timer armed");
    }

    pub fn on_hover_leave(&mut self, rt: &mut MenuRuntime) {
        self.timers.cancel_open(rt);
        if !self.visible {
            return;
        }
        self.timers.arm_close(self.id, self.config.hover_delay, rt);
        tracing::trace!(menu = %self.id, delay = ?self.config.hover_delay, "close timer armed");
    }

    /// Click on the trigger row. Always consumed; disabled triggers do nothing.
    pub fn on_click(&mut self, event: &Event, rt: &mut MenuRuntime) -> bool {
        if self.config.disabled {
            return true;
        }
        let merged = merge_data(&self.config.data, rt.store());
        if let Some(f) = self.config.on_click.get_mut() {
            f(event, &merged);
        }
        true
    }

    pub fn set_force_open(&mut self, force_open: bool, rt: &mut MenuRuntime) {
        if self.config.force_open == force_open {
            return;
        }
        self.config.force_open = force_open;
        self.reconcile(rt);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.config.selected = selected;
    }

    /// Close immediately, bypassing the hover delay.
    pub fn hide_menu(&mut self, rt: &mut MenuRuntime) {
        if self.config.force_open {
            if let Some(f) = self.config.force_close.get_mut() {
                f();
            }
            rt.post(MenuMessage::ForceClose(self.id));
        }
        self.visible = false;
        self.list.clear_selection(rt);
        self.unregister_handlers(rt);
        self.reconcile(rt);
    }

    /// Drop hover state and pending hover timers, then hide.
    pub(crate) fn dismiss(&mut self, rt: &mut MenuRuntime) {
        self.timers.cancel_all(rt);
        self.hovered = false;
        self.pointer_on_trigger = false;
        self.hide_menu(rt);
    }

    pub fn handle_wakeup(&mut self, kind: TimerKind, rt: &mut MenuRuntime) {
        match kind {
            TimerKind::HoverOpen => {
                if !self.timers.open_pending() {
                    return;
                }
                self.timers.fired(kind);
                self.visible = true;
                self.list.clear_selection(rt);
                self.reconcile(rt);
            }
            TimerKind::HoverClose => {
                if !self.timers.close_pending() {
                    return;
                }
                self.timers.fired(kind);
                self.visible = false;
                self.list.clear_selection(rt);
                self.reconcile(rt);
            }
            TimerKind::Paint => self.on_paint(rt),
            TimerKind::TransitionEnd => self.on_transition_end(rt),
        }
    }

    /// Keyboard navigation while this submenu owns the document keydown slot.
    pub fn handle_key_navigation(&mut self, key: &KeyEvent, rt: &mut MenuRuntime) -> bool {
        match self.list.navigate(key, rt) {
            NavOutcome::Ignored => false,
            NavOutcome::Handled => true,
            NavOutcome::Hide => {
                self.hide_menu(rt);
                true
            }
        }
    }

    /// Route a pointer move. Returns whether the pointer is inside this
    /// submenu's trigger row or panel tree.
    pub fn handle_pointer(
        &mut self,
        column: i32,
        row: i32,
        mouse: &MouseEvent,
        rt: &mut MenuRuntime,
    ) -> bool {
        let on_trigger = self.trigger_rect.is_some_and(|r| r.contains(column, row));
        if on_trigger {
            if let Some(f) = self.config.on_mouse_move.get_mut() {
                f(mouse);
            }
        } else if self.pointer_on_trigger
            && let Some(f) = self.config.on_mouse_out.get_mut()
        {
            f(mouse);
        }
        self.pointer_on_trigger = on_trigger;

        let in_panel = if self.style.visible {
            self.list.handle_pointer(column, row, mouse, rt)
        } else {
            self.list.pointer_gone(mouse, rt);
            false
        };

        let inside = on_trigger || in_panel;
        if inside && !self.hovered {
            self.hovered = true;
            self.on_hover_enter(rt);
        } else if !inside && self.hovered {
            self.hovered = false;
            self.on_hover_leave(rt);
        }
        inside
    }

    /// The pointer left the whole menu tree.
    pub(crate) fn pointer_gone(&mut self, mouse: &MouseEvent, rt: &mut MenuRuntime) {
        if self.pointer_on_trigger {
            self.pointer_on_trigger = false;
            if let Some(f) = self.config.on_mouse_out.get_mut() {
                f(mouse);
            }
        }
        self.list.pointer_gone(mouse, rt);
        if self.hovered {
            self.hovered = false;
            self.on_hover_leave(rt);
        }
    }

    /// This submenu, or a descendant, with the given id.
    pub fn find_mut(&mut self, id: HandlerId) -> Option<&mut SubMenu> {
        if self.id == id {
            return Some(self);
        }
        self.list.find_submenu_mut(id)
    }

    /// Place the trigger row and, from the current panel style, the panel.
    pub(crate) fn layout(&mut self, trigger: BoundingRect) {
        if self.trigger_rect != Some(trigger) {
            self.trigger_rect = Some(trigger);
            if let Some(f) = self.config.item_ref.get_mut() {
                f(trigger);
            }
        }
        let panel = self.style.resolve(trigger, self.list.natural_size());
        self.list.layout(panel);
    }

    pub(crate) fn render_trigger(&self, frame: &mut UiFrame, row: BoundingRect, rtl: bool) {
        let style = self.config.styles.trigger(
            self.config.disabled,
            self.style.visible,
            self.config.selected,
        );
        crate::components::menu_list::render_row(
            frame,
            row,
            &self.config.title,
            Some(if rtl { "◂" } else { "▸" }),
            style,
        );
    }

    pub(crate) fn render_panel(&self, frame: &mut UiFrame) {
        if !self.style.visible {
            return;
        }
        let style = self.config.styles.list.patch(self.config.panel_style);
        self.list.render(frame, style, self.config.rtl);
    }
}

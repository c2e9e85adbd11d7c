//! Root context menu.
//!
//! Owns the [`MenuRuntime`] of a menu tree and is the only thing a host talks
//! to: it turns terminal events, clock ticks and frames into calls on the
//! right menu by `HandlerId`, and drains the message queue after each of
//! them.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::style::Style;

use crate::components::menu_list::{MenuEntry, MenuList, NavOutcome};
use crate::components::submenu::SubMenu;
use crate::config::{MenuData, MenuOptions};
use crate::document::{DocumentEvent, HandlerId};
use crate::geometry::{BoundingRect, ViewportExtent};
use crate::global_listener::{ListenToken, ListenerSignal};
use crate::layout::{panel_at, root_menu_origin};
use crate::runtime::{MenuMessage, MenuRuntime};
use crate::theme;
use crate::timers::Wakeup;
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct ContextMenu {
    id: HandlerId,
    rt: MenuRuntime,
    list: MenuList,
    options: MenuOptions,
    visible: bool,
    origin: (i32, i32),
    listen_token: Option<ListenToken>,
    drag_armed: bool,
    panel_style: Style,
}

impl ContextMenu {
    /// Build the menu tree and mount every submenu on `rt`.
    pub fn new(entries: Vec<MenuEntry>, mut rt: MenuRuntime) -> Self {
        let id = HandlerId::next();
        let mut list = MenuList::new(entries);
        list.adopt(id);
        let listen_token = Some(rt.global_mut().register(None, id));
        list.mount_all(&mut rt);
        Self {
            id,
            rt,
            list,
            options: MenuOptions::default(),
            visible: false,
            origin: (0, 0),
            listen_token,
            drag_armed: false,
            panel_style: Style::default(),
        }
    }

    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.apply_options(options);
        self
    }

    /// Push tree-wide options into every submenu.
    pub fn apply_options(&mut self, options: MenuOptions) {
        self.options = options;
        self.list
            .visit_submenus_mut(&mut |sub: &mut SubMenu| options.apply_to(sub.config_mut()));
    }

    pub fn with_panel_style(mut self, style: Style) -> Self {
        self.panel_style = style;
        self
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn options(&self) -> MenuOptions {
        self.options
    }

    pub fn rtl(&self) -> bool {
        self.options.rtl()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn runtime(&self) -> &MenuRuntime {
        &self.rt
    }

    pub fn runtime_mut(&mut self) -> &mut MenuRuntime {
        &mut self.rt
    }

    pub fn list(&self) -> &MenuList {
        &self.list
    }

    pub fn find_submenu_mut(&mut self, id: HandlerId) -> Option<&mut SubMenu> {
        self.list.find_submenu_mut(id)
    }

    /// Submenu with the given title, searched depth first.
    pub fn submenu_by_title(&mut self, title: &str) -> Option<&mut SubMenu> {
        let mut found = None;
        self.list.visit_submenus_mut(&mut |sub: &mut SubMenu| {
            if found.is_none() && sub.title() == title {
                found = Some(sub.id());
            }
        });
        let id = found?;
        self.list.find_submenu_mut(id)
    }

    pub fn panel_rect(&self) -> Option<BoundingRect> {
        if !self.visible {
            return None;
        }
        let size = self.list.natural_size();
        Some(panel_at(self.origin, size.width, size.height))
    }

    pub fn set_viewport(&mut self, viewport: ViewportExtent) {
        self.rt.set_viewport(viewport);
        self.layout();
    }

    /// Earliest pending timer, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.rt.timers().next_deadline()
    }

    /// Show the menu at a pointer position with `data` as the context store.
    pub fn open_at(&mut self, column: i32, row: i32, data: MenuData) {
        if self.visible {
            self.hide_all();
        }
        self.rt.set_store(data);
        let size = self.list.natural_size();
        self.origin = root_menu_origin(column, row, size, self.rt.viewport(), self.rtl());
        self.visible = true;
        self.list.clear_selection(&mut self.rt);
        self.rt
            .document_mut()
            .add_listener(DocumentEvent::KeyDown, self.id);
        self.layout();
        self.process_messages();
        tracing::debug!(column, row, origin = ?self.origin, "context menu opened");
    }

    /// Close every submenu, deepest first, then the root.
    pub fn hide_all(&mut self) {
        self.list.reset(&mut self.rt);
        let was_visible = std::mem::replace(&mut self.visible, false);
        self.drag_armed = false;
        self.rt
            .document_mut()
            .remove_listener(DocumentEvent::KeyDown, self.id);
        if was_visible {
            tracing::debug!("context menu hidden");
        }
    }

    /// Feed a terminal event. Returns whether the menu consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let handled = match event {
            Event::Resize(width, height) => {
                self.set_viewport(ViewportExtent::new(*width as i32, *height as i32));
                false
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => self.dispatch_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, event),
            _ => false,
        };
        self.process_messages();
        handled
    }

    /// Feed an event that arrived at `now`. Hover timers armed by it are
    /// measured from `now` rather than from the last tick.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        self.rt.set_now(now);
        self.handle_event(event)
    }

    /// Advance the clock and run everything that came due: hover timers,
    /// timer-based paint callbacks and transition ends.
    pub fn tick(&mut self, now: Instant) {
        loop {
            self.layout();
            let due = self.rt.advance(now);
            if due.is_empty() {
                break;
            }
            for wakeup in due {
                self.dispatch_wakeup(wakeup);
            }
            self.process_messages();
        }
    }

    /// Run frame paint callbacks, then draw the visible panels.
    pub fn render(&mut self, frame: &mut UiFrame) {
        self.rt.set_viewport(ViewportExtent::from(frame.area()));
        self.layout();
        for owner in self.rt.take_frame() {
            if let Some(sub) = self.list.find_submenu_mut(owner) {
                sub.on_paint(&mut self.rt);
            }
        }
        self.layout();
        if !self.visible {
            return;
        }
        let style = theme::panel_style().patch(self.panel_style);
        self.list.render(frame, style, self.rtl());
    }

    /// Drop every registration the tree holds. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.list.unmount_all(&mut self.rt);
        self.rt
            .document_mut()
            .remove_listener(DocumentEvent::KeyDown, self.id);
        if let Some(token) = self.listen_token.take() {
            self.rt.global_mut().unregister(token);
        }
        self.visible = false;
    }

    fn layout(&mut self) {
        if let Some(panel) = self.panel_rect() {
            self.list.layout(panel);
        }
    }

    fn dispatch_wakeup(&mut self, wakeup: Wakeup) {
        match self.list.find_submenu_mut(wakeup.owner) {
            Some(sub) => sub.handle_wakeup(wakeup.kind, &mut self.rt),
            None => tracing::trace!(owner = %wakeup.owner, kind = ?wakeup.kind, "wakeup for unknown menu"),
        }
    }

    fn process_messages(&mut self) {
        while let Some(message) = self.rt.take_message() {
            match message {
                MenuMessage::ForceClose(child) => {
                    self.list.clear_forced_child(child, &mut self.rt);
                }
                MenuMessage::HideAll => self.hide_all(),
            }
        }
    }

    /// Deliver a key to every bound keydown listener, in binding order.
    fn dispatch_key(&mut self, key: &KeyEvent) -> bool {
        let targets = self
            .rt
            .document()
            .listeners(DocumentEvent::KeyDown)
            .to_vec();
        let mut handled = false;
        for target in targets {
            if target == self.id {
                if !self.visible {
                    continue;
                }
                match self.list.navigate(key, &mut self.rt) {
                    NavOutcome::Ignored => {}
                    NavOutcome::Handled => handled = true,
                    NavOutcome::Hide => {
                        self.hide_all();
                        handled = true;
                    }
                }
            } else if let Some(sub) = self.list.find_submenu_mut(target) {
                handled |= sub.handle_key_navigation(key, &mut self.rt);
            }
        }
        handled
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, event: &Event) -> bool {
        let column = mouse.column as i32;
        let row = mouse.row as i32;
        match mouse.kind {
            MouseEventKind::Moved => {
                self.visible && self.list.handle_pointer(column, row, mouse, &mut self.rt)
            }
            MouseEventKind::Down(button) => {
                self.drag_armed = true;
                if !self.visible {
                    return false;
                }
                if self.list.contains(column, row) {
                    if button == MouseButton::Left {
                        self.list.handle_click(column, row, event, &mut self.rt);
                    }
                    return true;
                }
                self.deactivate();
                false
            }
            MouseEventKind::Drag(_) => {
                if std::mem::take(&mut self.drag_armed) {
                    self.drag_start()
                } else {
                    false
                }
            }
            MouseEventKind::Up(_) => {
                self.drag_armed = false;
                false
            }
            _ => false,
        }
    }

    /// Interaction outside every open panel: run each deactivate handler.
    fn deactivate(&mut self) {
        let targets = self.rt.global().targets(ListenerSignal::Deactivate);
        let mut hide_root = false;
        for target in targets {
            if target == self.id {
                hide_root = true;
            } else if let Some(sub) = self.list.find_submenu_mut(target) {
                sub.hide_menu(&mut self.rt);
            }
        }
        if hide_root {
            self.hide_all();
        }
    }

    fn drag_start(&mut self) -> bool {
        let targets = self
            .rt
            .document()
            .listeners(DocumentEvent::DragStart)
            .to_vec();
        for target in &targets {
            if let Some(sub) = self.list.find_submenu_mut(*target) {
                sub.hide_menu(&mut self.rt);
            }
        }
        !targets.is_empty()
    }
}

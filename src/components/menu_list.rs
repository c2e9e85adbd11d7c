//! Entries of one menu panel: selection, keyboard navigation, pointer routing
//! and drawing. Used both by the root context menu and by every submenu.

use crossterm::event::{Event, KeyCode, KeyEvent, MouseEvent};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::components::menu_item::MenuItem;
use crate::components::submenu::SubMenu;
use crate::constants::SUBMENU_ARROW_WIDTH;
use crate::document::HandlerId;
use crate::geometry::{BoundingRect, PanelSize};
use crate::layout::{PANEL_BORDER, menu_rows};
use crate::runtime::MenuRuntime;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug)]
pub enum MenuEntry {
    Item(MenuItem),
    SubMenu(SubMenu),
    Divider,
}

impl MenuEntry {
    fn label(&self) -> &str {
        match self {
            MenuEntry::Item(item) => item.label(),
            MenuEntry::SubMenu(sub) => sub.title(),
            MenuEntry::Divider => "",
        }
    }

    fn is_selectable(&self) -> bool {
        match self {
            MenuEntry::Item(item) => !item.is_disabled(),
            MenuEntry::SubMenu(sub) => !sub.is_disabled(),
            MenuEntry::Divider => false,
        }
    }
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        MenuEntry::Item(item)
    }
}

impl From<SubMenu> for MenuEntry {
    fn from(sub: SubMenu) -> Self {
        MenuEntry::SubMenu(sub)
    }
}

/// What the owner of a list should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Ignored,
    Handled,
    Hide,
}

#[derive(Debug, Default)]
pub struct MenuList {
    entries: Vec<MenuEntry>,
    selected: Option<usize>,
    force_sub_menu_open: bool,
    panel: Option<BoundingRect>,
    rows: Vec<BoundingRect>,
    hovered_entry: Option<usize>,
}

impl MenuList {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn force_sub_menu_open(&self) -> bool {
        self.force_sub_menu_open
    }

    pub fn panel_rect(&self) -> Option<BoundingRect> {
        self.panel
    }

    pub fn row_rect(&self, index: usize) -> Option<BoundingRect> {
        self.rows.get(index).copied()
    }

    /// Make `owner` the keyboard handler every direct child hands the
    /// document back to when it closes.
    pub(crate) fn adopt(&mut self, owner: HandlerId) {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                sub.config.parent_key_handler = Some(owner);
            }
        }
    }

    pub fn natural_size(&self) -> PanelSize {
        let inner = self
            .entries
            .iter()
            .map(|entry| {
                let arrow = match entry {
                    MenuEntry::SubMenu(_) => SUBMENU_ARROW_WIDTH as i32,
                    _ => 0,
                };
                entry.label().chars().count() as i32 + 2 + arrow
            })
            .max()
            .unwrap_or(2);
        PanelSize::new(
            inner + 2 * PANEL_BORDER,
            self.entries.len() as i32 + 2 * PANEL_BORDER,
        )
    }

    /// Place the panel and, recursively, every child submenu.
    pub(crate) fn layout(&mut self, panel: BoundingRect) {
        self.panel = Some(panel);
        self.rows = menu_rows(panel, self.entries.len());
        for (entry, row) in self.entries.iter_mut().zip(self.rows.iter()) {
            if let MenuEntry::SubMenu(sub) = entry {
                sub.layout(*row);
            }
        }
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        if self.panel.is_some_and(|p| p.contains(column, row)) {
            return true;
        }
        self.entries.iter().any(|entry| match entry {
            MenuEntry::SubMenu(sub) => sub.is_panel_shown() && sub.list.contains(column, row),
            _ => false,
        })
    }

    pub(crate) fn mount_all(&mut self, rt: &mut MenuRuntime) {
        self.visit_direct_submenus(|sub| sub.mount(rt));
    }

    pub(crate) fn unmount_all(&mut self, rt: &mut MenuRuntime) {
        self.visit_direct_submenus(|sub| sub.unmount(rt));
    }

    fn visit_direct_submenus(&mut self, mut f: impl FnMut(&mut SubMenu)) {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                f(sub);
            }
        }
    }

    /// Every submenu in the tree, parents before children.
    pub fn visit_submenus_mut(&mut self, f: &mut dyn FnMut(&mut SubMenu)) {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                f(sub);
                sub.list.visit_submenus_mut(f);
            }
        }
    }

    pub fn find_submenu_mut(&mut self, id: HandlerId) -> Option<&mut SubMenu> {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                if sub.id() == id {
                    return Some(sub);
                }
                if let Some(found) = sub.list.find_submenu_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Push selection and the forced-open flag down to child submenus.
    ///
    /// A child is forced open only while it is the selected entry and the
    /// list asked for its selected submenu to open.
    fn sync_children(&mut self, rt: &mut MenuRuntime) {
        let selected = self.selected;
        let force = self.force_sub_menu_open;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if let MenuEntry::SubMenu(sub) = entry {
                let is_selected = selected == Some(i);
                sub.set_selected(is_selected);
                sub.set_force_open(force && is_selected, rt);
            }
        }
    }

    fn select(&mut self, index: Option<usize>, rt: &mut MenuRuntime) {
        self.selected = index;
        self.force_sub_menu_open = false;
        self.sync_children(rt);
    }

    pub fn clear_selection(&mut self, rt: &mut MenuRuntime) {
        self.select(None, rt);
    }

    pub fn select_next(&mut self, rt: &mut MenuRuntime) {
        let next = self.step(true);
        self.select(next, rt);
    }

    pub fn select_prev(&mut self, rt: &mut MenuRuntime) {
        let prev = self.step(false);
        self.select(prev, rt);
    }

    /// Next selectable index in the given direction, wrapping around.
    fn step(&self, forward: bool) -> Option<usize> {
        let n = self.entries.len();
        if n == 0 {
            return None;
        }
        let start = match self.selected {
            Some(i) => i,
            None if forward => n - 1,
            None => 0,
        };
        (1..=n)
            .map(|offset| {
                if forward {
                    (start + offset) % n
                } else {
                    (start + n - offset) % n
                }
            })
            .find(|&idx| self.entries[idx].is_selectable())
            .or(self.selected)
    }

    /// Force the selected entry open if it is a submenu.
    fn try_open_sub_menu(&mut self, rt: &mut MenuRuntime) -> bool {
        let is_sub = self
            .selected
            .and_then(|i| self.entries.get(i))
            .is_some_and(|entry| matches!(entry, MenuEntry::SubMenu(_)));
        if is_sub {
            self.force_sub_menu_open = true;
            self.sync_children(rt);
        }
        is_sub
    }

    pub fn navigate(&mut self, key: &KeyEvent, rt: &mut MenuRuntime) -> NavOutcome {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev(rt);
                NavOutcome::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next(rt);
                NavOutcome::Handled
            }
            KeyCode::Left | KeyCode::Esc => NavOutcome::Hide,
            KeyCode::Right => {
                self.try_open_sub_menu(rt);
                NavOutcome::Handled
            }
            KeyCode::Enter => {
                if self.try_open_sub_menu(rt) {
                    return NavOutcome::Handled;
                }
                let event = Event::Key(*key);
                match self.selected.and_then(|i| self.entries.get_mut(i)) {
                    Some(MenuEntry::Item(item)) if !item.is_disabled() => {
                        item.click(&event, rt);
                        NavOutcome::Handled
                    }
                    _ => NavOutcome::Hide,
                }
            }
            _ => NavOutcome::Ignored,
        }
    }

    /// Route a pointer move over this panel. Returns whether the pointer is
    /// inside the panel or a shown descendant panel.
    pub(crate) fn handle_pointer(
        &mut self,
        column: i32,
        row: i32,
        mouse: &MouseEvent,
        rt: &mut MenuRuntime,
    ) -> bool {
        let mut hovered = None;
        let mut inside_child = false;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let inside = match entry {
                MenuEntry::SubMenu(sub) => sub.handle_pointer(column, row, mouse, rt),
                _ => self.rows.get(i).is_some_and(|r| r.contains(column, row)),
            };
            if inside && hovered.is_none() {
                hovered = Some(i);
            }
            inside_child |= inside;
        }

        let on_row = self.rows.iter().position(|r| r.contains(column, row));
        if let Some(i) = on_row
            && self.selected != Some(i)
            && self.entries[i].is_selectable()
        {
            self.select(Some(i), rt);
        }

        self.leave_entry(hovered, rt);
        inside_child || self.panel.is_some_and(|p| p.contains(column, row))
    }

    /// Forget every hover state below this list.
    pub(crate) fn pointer_gone(&mut self, mouse: &MouseEvent, rt: &mut MenuRuntime) {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                sub.pointer_gone(mouse, rt);
            }
        }
        self.leave_entry(None, rt);
    }

    /// Leaving a plain item clears the selection.
    fn leave_entry(&mut self, now_hovered: Option<usize>, rt: &mut MenuRuntime) {
        let previous = std::mem::replace(&mut self.hovered_entry, now_hovered);
        if let Some(prev) = previous
            && now_hovered != Some(prev)
            && matches!(self.entries.get(prev), Some(MenuEntry::Item(_)))
            && self.selected == Some(prev)
        {
            self.clear_selection(rt);
        }
    }

    /// Click at a position. Shown child panels are hit first since they are
    /// drawn on top. Returns whether the click landed on this panel tree.
    pub(crate) fn handle_click(
        &mut self,
        column: i32,
        row: i32,
        event: &Event,
        rt: &mut MenuRuntime,
    ) -> bool {
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry
                && sub.is_panel_shown()
                && sub.list.contains(column, row)
            {
                return sub.list.handle_click(column, row, event, rt);
            }
        }
        let hit = self.rows.iter().position(|r| r.contains(column, row));
        if let Some(i) = hit {
            match &mut self.entries[i] {
                MenuEntry::Item(item) => {
                    item.click(event, rt);
                }
                MenuEntry::SubMenu(sub) => {
                    sub.on_click(event, rt);
                }
                MenuEntry::Divider => {}
            }
            return true;
        }
        self.panel.is_some_and(|p| p.contains(column, row))
    }

    /// Drop the forced-open flag if `child` is one of this list's entries,
    /// otherwise look further down the tree.
    pub(crate) fn clear_forced_child(&mut self, child: HandlerId, rt: &mut MenuRuntime) -> bool {
        let direct = self
            .entries
            .iter()
            .any(|entry| matches!(entry, MenuEntry::SubMenu(sub) if sub.id() == child));
        if direct {
            self.force_sub_menu_open = false;
            self.sync_children(rt);
            return true;
        }
        self.entries.iter_mut().any(|entry| match entry {
            MenuEntry::SubMenu(sub) => sub.list.clear_forced_child(child, rt),
            _ => false,
        })
    }

    /// Close every submenu below this list, deepest first.
    pub(crate) fn reset(&mut self, rt: &mut MenuRuntime) {
        self.selected = None;
        self.force_sub_menu_open = false;
        self.hovered_entry = None;
        self.sync_children(rt);
        for entry in &mut self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                sub.list.reset(rt);
                sub.dismiss(rt);
            }
        }
    }

    /// Draw this panel and every shown child panel on top of it.
    pub(crate) fn render(&self, frame: &mut UiFrame, panel_style: Style, rtl: bool) {
        let Some(panel) = self.panel else {
            return;
        };
        frame.fill(panel, panel_style);
        if let Some(area) = frame.clip(panel) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::menu_border()))
                .style(panel_style);
            frame.render_widget(block, area);
        }

        for (i, (entry, row)) in self.entries.iter().zip(self.rows.iter()).enumerate() {
            let selected = self.selected == Some(i);
            match entry {
                MenuEntry::Item(item) => {
                    let style = if item.is_disabled() {
                        theme::item_style().patch(theme::disabled_style())
                    } else if selected {
                        theme::selected_style()
                    } else {
                        theme::item_style()
                    };
                    render_row(frame, *row, item.label(), None, style);
                }
                MenuEntry::SubMenu(sub) => sub.render_trigger(frame, *row, rtl),
                MenuEntry::Divider => {
                    let line = "─".repeat(row.width.max(0) as usize);
                    let style = Style::default()
                        .fg(theme::divider_fg())
                        .bg(theme::menu_bg());
                    frame.set_string_signed(row.left, row.top, &line, row.width, style);
                }
            }
        }

        for entry in &self.entries {
            if let MenuEntry::SubMenu(sub) = entry {
                sub.render_panel(frame);
            }
        }
    }
}

/// One menu row: padded label, and an optional arrow flush right.
pub(crate) fn render_row(
    frame: &mut UiFrame,
    row: BoundingRect,
    label: &str,
    arrow: Option<&str>,
    style: Style,
) {
    frame.fill(row, style);
    let arrow_width = if arrow.is_some() {
        SUBMENU_ARROW_WIDTH as i32
    } else {
        0
    };
    frame.set_string_signed(row.left + 1, row.top, label, row.width - 2 - arrow_width, style);
    if let Some(arrow) = arrow {
        frame.set_string_signed(row.right() - arrow_width, row.top, arrow, arrow_width, style);
    }
}

//! Menu configuration.
//!
//! `SubMenuConfig` carries everything a submenu is told by its owner: label,
//! behaviour flags, style overrides and the optional callbacks. Missing
//! callbacks are simply not called. `MenuOptions` holds the validated,
//! tree-wide knobs the demo binary exposes on its command line.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crossterm::event::{Event, MouseEvent};
use ratatui::style::Style;

use crate::constants::{
    DEFAULT_HOVER_DELAY, DEFAULT_PANEL_TRANSITION, MAX_HOVER_DELAY, MAX_PANEL_TRANSITION,
};
use crate::document::HandlerId;
use crate::error::OptionsError;
use crate::geometry::BoundingRect;
use crate::theme;

/// Free-form data attached to menu items and to the context menu trigger.
pub type MenuData = BTreeMap<String, String>;

pub type ClickFn = dyn FnMut(&Event, &MenuData);
pub type MouseFn = dyn FnMut(&MouseEvent);
pub type ForceCloseFn = dyn FnMut();
pub type ItemRefFn = dyn FnMut(BoundingRect);

/// Optional boxed callback.
pub struct Hook<F: ?Sized>(pub(crate) Option<Box<F>>);

impl<F: ?Sized> Hook<F> {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut F> {
        self.0.as_deref_mut()
    }
}

impl<F: ?Sized> Default for Hook<F> {
    fn default() -> Self {
        Self::none()
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Hook(set)" } else { "Hook(none)" })
    }
}

/// Style overrides per visual state, layered over the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyles {
    /// Trigger row in its resting state.
    pub item: Style,
    /// Panel (border and background) of the submenu.
    pub list: Style,
    pub disabled: Style,
    /// Trigger row while its submenu is visible.
    pub visible: Style,
    /// Trigger row while selected by the parent menu.
    pub selected: Style,
}

impl Default for MenuStyles {
    fn default() -> Self {
        Self {
            item: theme::item_style(),
            list: theme::panel_style(),
            disabled: theme::disabled_style(),
            visible: theme::active_style(),
            selected: theme::selected_style(),
        }
    }
}

impl MenuStyles {
    /// Compose the trigger row style for the given state.
    pub fn trigger(&self, disabled: bool, visible: bool, selected: bool) -> Style {
        let mut style = self.item;
        if disabled {
            style = style.patch(self.disabled);
        }
        if visible {
            style = style.patch(self.visible);
        }
        if selected {
            style = style.patch(self.selected);
        }
        style
    }
}

#[derive(Debug)]
pub struct SubMenuConfig {
    pub title: String,
    pub disabled: bool,
    pub hover_delay: Duration,
    pub rtl: bool,
    pub selected: bool,
    pub force_open: bool,
    pub transition: Duration,
    pub data: MenuData,
    pub styles: MenuStyles,
    /// Extra style patched over the panel.
    pub panel_style: Style,
    /// Handler restored on the document when this submenu closes.
    pub parent_key_handler: Option<HandlerId>,
    pub(crate) on_click: Hook<ClickFn>,
    pub(crate) on_mouse_move: Hook<MouseFn>,
    pub(crate) on_mouse_out: Hook<MouseFn>,
    pub(crate) force_close: Hook<ForceCloseFn>,
    pub(crate) item_ref: Hook<ItemRefFn>,
}

impl SubMenuConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            disabled: false,
            hover_delay: DEFAULT_HOVER_DELAY,
            rtl: false,
            selected: false,
            force_open: false,
            transition: DEFAULT_PANEL_TRANSITION,
            data: MenuData::new(),
            styles: MenuStyles::default(),
            panel_style: Style::default(),
            parent_key_handler: None,
            on_click: Hook::none(),
            on_mouse_move: Hook::none(),
            on_mouse_out: Hook::none(),
            force_close: Hook::none(),
            item_ref: Hook::none(),
        }
    }

    pub fn on_click(mut self, f: impl FnMut(&Event, &MenuData) + 'static) -> Self {
        let f: Box<ClickFn> = Box::new(f);
        self.on_click = Hook(Some(f));
        self
    }

    pub fn on_mouse_move(mut self, f: impl FnMut(&MouseEvent) + 'static) -> Self {
        let f: Box<MouseFn> = Box::new(f);
        self.on_mouse_move = Hook(Some(f));
        self
    }

    pub fn on_mouse_out(mut self, f: impl FnMut(&MouseEvent) + 'static) -> Self {
        let f: Box<MouseFn> = Box::new(f);
        self.on_mouse_out = Hook(Some(f));
        self
    }

    pub fn on_force_close(mut self, f: impl FnMut() + 'static) -> Self {
        let f: Box<ForceCloseFn> = Box::new(f);
        self.force_close = Hook(Some(f));
        self
    }

    pub fn item_ref(mut self, f: impl FnMut(BoundingRect) + 'static) -> Self {
        let f: Box<ItemRefFn> = Box::new(f);
        self.item_ref = Hook(Some(f));
        self
    }
}

impl Default for SubMenuConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Validated tree-wide options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOptions {
    hover_delay: Duration,
    transition: Duration,
    rtl: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            hover_delay: DEFAULT_HOVER_DELAY,
            transition: DEFAULT_PANEL_TRANSITION,
            rtl: false,
        }
    }
}

impl MenuOptions {
    pub fn new(hover_delay: Duration, transition: Duration, rtl: bool) -> Result<Self, OptionsError> {
        if hover_delay > MAX_HOVER_DELAY {
            return Err(OptionsError::HoverDelayTooLong {
                got: hover_delay,
                max: MAX_HOVER_DELAY,
            });
        }
        if transition > MAX_PANEL_TRANSITION {
            return Err(OptionsError::TransitionTooLong {
                got: transition,
                max: MAX_PANEL_TRANSITION,
            });
        }
        Ok(Self {
            hover_delay,
            transition,
            rtl,
        })
    }

    pub fn hover_delay(&self) -> Duration {
        self.hover_delay
    }

    pub fn transition(&self) -> Duration {
        self.transition
    }

    pub fn rtl(&self) -> bool {
        self.rtl
    }

    pub fn apply_to(&self, config: &mut SubMenuConfig) {
        config.hover_delay = self.hover_delay;
        config.transition = self.transition;
        config.rtl = self.rtl;
    }
}

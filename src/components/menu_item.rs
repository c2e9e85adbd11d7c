use crossterm::event::Event;

use crate::config::{ClickFn, Hook, MenuData};
use crate::runtime::{MenuMessage, MenuRuntime};

/// A leaf row that runs a callback when activated.
#[derive(Debug)]
pub struct MenuItem {
    label: String,
    disabled: bool,
    data: MenuData,
    on_click: Hook<ClickFn>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            data: MenuData::new(),
            on_click: Hook::none(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn on_click(mut self, f: impl FnMut(&Event, &MenuData) + 'static) -> Self {
        let f: Box<ClickFn> = Box::new(f);
        self.on_click = Hook(Some(f));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Run the click callback with the item data merged under the context
    /// store, then ask the host to close the menu.
    ///
    /// Disabled items swallow the click and do nothing.
    pub fn click(&mut self, event: &Event, rt: &mut MenuRuntime) -> bool {
        if self.disabled {
            return true;
        }
        let merged = merge_data(&self.data, rt.store());
        tracing::debug!(label = %self.label, "menu item activated");
        if let Some(f) = self.on_click.get_mut() {
            f(event, &merged);
        }
        rt.post(MenuMessage::HideAll);
        true
    }
}

/// `own` overlaid by `store`; store keys win.
pub(crate) fn merge_data(own: &MenuData, store: &MenuData) -> MenuData {
    let mut merged = own.clone();
    merged.extend(store.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn click_merges_store_over_item_data() {
        let seen = Rc::new(RefCell::new(MenuData::new()));
        let sink = seen.clone();
        let mut item = MenuItem::new("Copy")
            .data("action", "copy")
            .data("target", "item")
            .on_click(move |_, data| *sink.borrow_mut() = data.clone());
        let mut rt = MenuRuntime::headless(Instant::now());
        let mut store = MenuData::new();
        store.insert("target".into(), "row-7".into());
        rt.set_store(store);

        assert!(item.click(&enter(), &mut rt));
        let seen = seen.borrow();
        assert_eq!(seen.get("action").map(String::as_str), Some("copy"));
        assert_eq!(seen.get("target").map(String::as_str), Some("row-7"));
        assert_eq!(rt.take_message(), Some(MenuMessage::HideAll));
    }

    #[test]
    fn disabled_click_is_silent() {
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        let mut item = MenuItem::new("Paste")
            .disabled(true)
            .on_click(move |_, _| *h.borrow_mut() += 1);
        let mut rt = MenuRuntime::headless(Instant::now());
        assert!(item.click(&enter(), &mut rt));
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(rt.take_message(), None);
    }
}

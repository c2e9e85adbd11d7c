//! Document-level listener registry.
//!
//! Menus do not own closures on the document. Each menu has a `HandlerId`;
//! binding a handler records that id under an event kind, and the host
//! routes dispatched events back to the menu with that id.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a menu's event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    KeyDown,
    DragStart,
}

#[derive(Debug, Default)]
pub struct Document {
    key_down: Vec<HandlerId>,
    drag_start: Vec<HandlerId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, event: DocumentEvent) -> &Vec<HandlerId> {
        match event {
            DocumentEvent::KeyDown => &self.key_down,
            DocumentEvent::DragStart => &self.drag_start,
        }
    }

    fn slot_mut(&mut self, event: DocumentEvent) -> &mut Vec<HandlerId> {
        match event {
            DocumentEvent::KeyDown => &mut self.key_down,
            DocumentEvent::DragStart => &mut self.drag_start,
        }
    }

    /// Bind `handler` to `event`. Binding an already bound handler is a no-op.
    pub fn add_listener(&mut self, event: DocumentEvent, handler: HandlerId) {
        let slot = self.slot_mut(event);
        if !slot.contains(&handler) {
            slot.push(handler);
        }
    }

    /// Unbind `handler` from `event`. Unbinding a missing handler is a no-op.
    pub fn remove_listener(&mut self, event: DocumentEvent, handler: HandlerId) {
        self.slot_mut(event).retain(|h| *h != handler);
    }

    /// Unbind every handler from `event`, returning them in binding order.
    pub fn take_listeners(&mut self, event: DocumentEvent) -> Vec<HandlerId> {
        std::mem::take(self.slot_mut(event))
    }

    pub fn has_listener(&self, event: DocumentEvent, handler: HandlerId) -> bool {
        self.slot(event).contains(&handler)
    }

    /// Handlers bound to `event`, in binding order.
    pub fn listeners(&self, event: DocumentEvent) -> &[HandlerId] {
        self.slot(event)
    }

    /// Whether `handler` is bound to any event.
    pub fn is_bound(&self, handler: HandlerId) -> bool {
        self.key_down.contains(&handler) || self.drag_start.contains(&handler)
    }

    pub fn listener_count(&self) -> usize {
        self.key_down.len() + self.drag_start.len()
    }
}

//! Document and dispatcher registrations of a submenu.
//!
//! While open, a submenu takes over the document keydown slot from its
//! parent and listens for drag starts. Whoever holds keydown when a submenu
//! binds is evicted first, so exactly one menu handles a key at a time. That
//! is usually the parent, but may be a sibling whose close is still pending.

use crate::document::DocumentEvent;
use crate::runtime::MenuRuntime;

use super::SubMenu;

impl SubMenu {
    pub(crate) fn register_handlers(&mut self, rt: &mut MenuRuntime) {
        let doc = rt.document_mut();
        let evicted = doc.take_listeners(DocumentEvent::KeyDown);
        doc.add_listener(DocumentEvent::KeyDown, self.id);
        doc.add_listener(DocumentEvent::DragStart, self.id);
        tracing::trace!(menu = %self.id, ?evicted, "handlers bound");
    }

    /// Inverse of `register_handlers`. A no-op when nothing is bound.
    ///
    /// The parent handler is only handed back if this submenu still held the
    /// keydown slot. A submenu evicted by a later sibling gives nothing back.
    pub(crate) fn unregister_handlers(&mut self, rt: &mut MenuRuntime) {
        let doc = rt.document_mut();
        let held_keys = doc.has_listener(DocumentEvent::KeyDown, self.id);
        doc.remove_listener(DocumentEvent::KeyDown, self.id);
        if held_keys && let Some(parent) = self.config.parent_key_handler {
            doc.add_listener(DocumentEvent::KeyDown, parent);
        }
        doc.remove_listener(DocumentEvent::DragStart, self.id);
        if held_keys {
            tracing::trace!(menu = %self.id, "handlers unbound");
        }
    }

    pub(crate) fn register_global(&mut self, rt: &mut MenuRuntime) {
        let token = rt.global_mut().register(None, self.id);
        self.listen_token = Some(token);
    }

    pub(crate) fn unregister_global(&mut self, rt: &mut MenuRuntime) {
        if let Some(token) = self.listen_token.take() {
            rt.global_mut().unregister(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubMenuConfig;
    use crate::document::HandlerId;
    use std::time::Instant;

    fn submenu_with_parent(parent: HandlerId) -> SubMenu {
        let mut config = SubMenuConfig::new("More");
        config.parent_key_handler = Some(parent);
        SubMenu::new(config, Vec::new())
    }

    #[test]
    fn register_swaps_parent_keydown_out() {
        let mut rt = MenuRuntime::headless(Instant::now());
        let parent = HandlerId::next();
        rt.document_mut().add_listener(DocumentEvent::KeyDown, parent);
        let mut sub = submenu_with_parent(parent);

        sub.register_handlers(&mut rt);
        assert_eq!(rt.document().listeners(DocumentEvent::KeyDown), &[sub.id()]);
        assert_eq!(rt.document().listeners(DocumentEvent::DragStart), &[sub.id()]);

        sub.unregister_handlers(&mut rt);
        assert_eq!(rt.document().listeners(DocumentEvent::KeyDown), &[parent]);
        assert!(rt.document().listeners(DocumentEvent::DragStart).is_empty());
    }

    #[test]
    fn evicted_sibling_does_not_restore_parent() {
        let mut rt = MenuRuntime::headless(Instant::now());
        let parent = HandlerId::next();
        rt.document_mut().add_listener(DocumentEvent::KeyDown, parent);
        let mut first = submenu_with_parent(parent);
        let mut second = submenu_with_parent(parent);

        first.register_handlers(&mut rt);
        second.register_handlers(&mut rt);
        assert_eq!(rt.document().listeners(DocumentEvent::KeyDown), &[second.id()]);

        first.unregister_handlers(&mut rt);
        assert_eq!(rt.document().listeners(DocumentEvent::KeyDown), &[second.id()]);
        assert_eq!(rt.document().listeners(DocumentEvent::DragStart), &[second.id()]);

        second.unregister_handlers(&mut rt);
        assert_eq!(rt.document().listeners(DocumentEvent::KeyDown), &[parent]);
    }

    #[test]
    fn unregister_without_register_leaves_document_alone() {
        let mut rt = MenuRuntime::headless(Instant::now());
        let parent = HandlerId::next();
        let mut sub = submenu_with_parent(parent);
        sub.unregister_handlers(&mut rt);
        sub.unregister_handlers(&mut rt);
        assert_eq!(rt.document().listener_count(), 0);
    }

    #[test]
    fn global_registration_round_trip() {
        let mut rt = MenuRuntime::headless(Instant::now());
        let mut sub = submenu_with_parent(HandlerId::next());
        sub.register_global(&mut rt);
        assert_eq!(rt.global().len(), 1);
        sub.unregister_global(&mut rt);
        sub.unregister_global(&mut rt);
        assert!(rt.global().is_empty());
    }
}

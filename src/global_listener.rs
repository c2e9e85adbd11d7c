//! Process-wide activate/deactivate dispatcher.
//!
//! Menus register once at mount with an optional "activate" handler and a
//! "deactivate" handler. When the host detects an interaction outside every
//! open menu it asks the dispatcher for the deactivate targets and hides each
//! of them. The dispatcher is injected into the runtime so tests can replace
//! it.

use std::collections::BTreeMap;

use crate::document::HandlerId;

/// Token returned by `register`, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerSignal {
    Activate,
    Deactivate,
}

pub trait GlobalListener: std::fmt::Debug {
    fn register(&mut self, on_activate: Option<HandlerId>, on_deactivate: HandlerId)
    -> ListenToken;

    /// Forget `token`. Unknown tokens are ignored.
    fn unregister(&mut self, token: ListenToken);

    /// Handlers to invoke for `signal`, in registration order.
    fn targets(&self, signal: ListenerSignal) -> Vec<HandlerId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    on_activate: Option<HandlerId>,
    on_deactivate: HandlerId,
}

/// Default dispatcher backing click-outside dismissal.
#[derive(Debug, Default)]
pub struct ClickOutsideListener {
    next_token: u64,
    entries: BTreeMap<ListenToken, Registration>,
}

impl ClickOutsideListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobalListener for ClickOutsideListener {
    fn register(
        &mut self,
        on_activate: Option<HandlerId>,
        on_deactivate: HandlerId,
    ) -> ListenToken {
        self.next_token += 1;
        let token = ListenToken(self.next_token);
        self.entries.insert(
            token,
            Registration {
                on_activate,
                on_deactivate,
            },
        );
        tracing::trace!(?token, %on_deactivate, "global listener registered");
        token
    }

    fn unregister(&mut self, token: ListenToken) {
        if self.entries.remove(&token).is_some() {
            tracing::trace!(?token, "global listener unregistered");
        }
    }

    fn targets(&self, signal: ListenerSignal) -> Vec<HandlerId> {
        self.entries
            .values()
            .filter_map(|entry| match signal {
                ListenerSignal::Activate => entry.on_activate,
                ListenerSignal::Deactivate => Some(entry.on_deactivate),
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

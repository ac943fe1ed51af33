//! Cooperative, single-threaded event bus.
//!
//! Models the host client's dispatcher: handlers are registered under a
//! named event kind and run to completion, one event at a time, so no
//! handler ever observes a half-applied mutation. `subscribe` hands back a
//! token; `unsubscribe` removes exactly the handler that token was issued
//! for, which is what keeps repeated start/stop cycles from leaking
//! subscriptions.

use std::collections::HashMap;

use crate::types::{EventKind, GatewayEvent};

/// A registered event handler.
pub type Handler = Box<dyn FnMut(&GatewayEvent)>;

/// Token identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Dispatches [`GatewayEvent`]s to subscribed handlers.
#[derive(Default)]
pub struct Dispatcher {
    next_id: u64,
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.entry(kind).or_default().push((id, handler));
        tracing::debug!(kind = kind.as_str(), id = id.0, "subscribed handler");
        id
    }

    /// Remove the subscription identified by `id`.
    ///
    /// Returns false when no such subscription exists (already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(pos) = handlers.iter().position(|(hid, _)| *hid == id) {
                handlers.remove(pos);
                tracing::debug!(id = id.0, "unsubscribed handler");
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every handler registered for its kind, in
    /// subscription order.
    pub fn dispatch(&mut self, event: &GatewayEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of live subscriptions for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

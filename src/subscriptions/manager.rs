//! Subscriber registry for broadcasting roster changes.

use parking_lot::RwLock;
use tracing::debug;

use super::types::{Listener, Notification, Subscriber};

/// Ordered list of subscribers.
///
/// Listeners are invoked after the registry lock is released, so a listener
/// may read from (or subscribe to) the store that notified it.
pub struct SubscriberRegistry {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a subscriber. Names are not required to be unique.
    pub fn subscribe(&self, subscriber: Subscriber) {
        debug!(name = %subscriber.name, filter = ?subscriber.filter, "subscribed");
        self.subscribers.write().push(subscriber);
    }

    /// Remove every subscriber named `name`. Returns how many were removed.
    pub fn unsubscribe(&self, name: &str) -> usize {
        let mut subs = self.subscribers.write();
        let before = subs.len();
        subs.retain(|sub| sub.name != name);
        before - subs.len()
    }

    /// Drop all subscribers.
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    /// Subscriber names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.subscribers
            .read()
            .iter()
            .map(|sub| sub.name.clone())
            .collect()
    }

    /// Fire every subscriber whose filter accepts `notification`, in
    /// registration order. Returns the number of listeners invoked.
    pub fn notify(&self, notification: &Notification<'_>) -> usize {
        let listeners: Vec<Listener> = {
            let subs = self.subscribers.read();
            subs.iter()
                .filter(|sub| sub.filter.accepts(notification))
                .map(|sub| sub.listener.clone())
                .collect()
        };

        for listener in &listeners {
            listener();
        }

        listeners.len()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

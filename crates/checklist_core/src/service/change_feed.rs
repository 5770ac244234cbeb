//! In-process change notifications for the todo store.
//!
//! # Invariants
//! - Listeners are invoked in subscription order.
//! - A notification is only published after the mutation it describes has
//!   been committed.

use crate::model::todo::TodoId;
use std::collections::BTreeMap;

/// One committed mutation of the todo store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoChange {
    Added(TodoId),
    Updated(TodoId),
    /// Ids that were actually removed; never empty.
    Deleted(Vec<TodoId>),
}

/// Receiver of store change notifications.
pub trait ChangeListener {
    fn on_change(&self, change: &TodoChange);
}

impl<F> ChangeListener for F
where
    F: Fn(&TodoChange),
{
    fn on_change(&self, change: &TodoChange) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Ordered listener registry.
#[derive(Default)]
pub struct ChangeFeed {
    listeners: BTreeMap<SubscriptionId, Box<dyn ChangeListener>>,
    next_id: u64,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&self, change: &TodoChange) {
        for listener in self.listeners.values() {
            listener.on_change(change);
        }
    }
}

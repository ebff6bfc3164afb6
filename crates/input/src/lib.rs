//! Keyboard input shared by movement controllers.
//!
//! Hosts translate their native key events into [`InputHub::key_down`] and
//! [`InputHub::key_up`]. Every live subscription sees the same presses, so
//! controllers never read raw window events.
//!
//! # Invariants
//! - A subscription only tracks keys pressed after it was taken.
//! - Released subscriptions stop receiving events immediately.

pub mod keys;

pub use keys::{Key, KeyState};

use std::collections::BTreeMap;

/// Handle of one [`InputHub`] subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Fan-out of key events to per-subscriber key states.
#[derive(Debug, Default)]
pub struct InputHub {
    subscribers: BTreeMap<SubscriptionId, KeyState>,
    next_id: u64,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking keys for a new listener. All keys start released.
    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, KeyState::default());
        tracing::trace!(subscription = id.0, "input subscription taken");
        id
    }

    /// Drop a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            tracing::trace!(subscription = id.0, "input subscription released");
        }
        removed
    }

    pub fn key_down(&mut self, key: Key) {
        self.broadcast(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.broadcast(key, false);
    }

    fn broadcast(&mut self, key: Key, pressed: bool) {
        for state in self.subscribers.values_mut() {
            state.set(key, pressed);
        }
    }

    /// Key state seen by one subscription.
    pub fn state(&self, id: SubscriptionId) -> Option<KeyState> {
        self.subscribers.get(&id).copied()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Release every key for every subscriber, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.subscribers.values_mut() {
            *state = KeyState::default();
        }
    }
}

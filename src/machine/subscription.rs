//! Engine-wide subscriber registry.

use crate::core::{Subscriber, Transition};
use std::fmt;

/// Key returned by [`States::subscribe`](crate::States::subscribe).
///
/// Keys are never reused by the engine that issued them, including across
/// [`States::dispose`](crate::States::dispose).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionKey(String);

impl SubscriptionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subscribers in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Subscriptions {
    entries: Vec<(SubscriptionKey, Subscriber)>,
    issued: u64,
}

impl Subscriptions {
    /// Register a subscriber. With `single`, a subscriber already present is
    /// not added again and `None` is returned.
    pub(crate) fn insert(
        &mut self,
        subscriber: Subscriber,
        single: bool,
    ) -> Option<SubscriptionKey> {
        if single && self.contains(&subscriber) {
            return None;
        }
        self.issued += 1;
        let key = SubscriptionKey(format!("_ssk{}", self.issued));
        self.entries.push((key.clone(), subscriber));
        Some(key)
    }

    pub(crate) fn remove(&mut self, key: &SubscriptionKey) -> bool {
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, subscriber: &Subscriber) -> bool {
        self.entries.iter().any(|(_, s)| s.same_as(subscriber))
    }

    pub(crate) fn notify(&self, transition: &Transition) {
        for (_, subscriber) in &self.entries {
            subscriber.call(transition);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

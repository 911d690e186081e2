//! Log of traversed transitions.
//!
//! The engine appends one record for every traversal that moves the current
//! state. Handler failures and the synthetic dispose notification are never
//! recorded.

use super::transition::Transition;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// One traversal, captured by name at the moment the state moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    pub action: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub(crate) fn capture(transition: &Transition) -> Self {
        Self {
            from: transition.from().name().to_string(),
            to: transition.to().name().to_string(),
            action: transition.action().map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered traversal log, optionally bounded.
///
/// When a capacity is set, the oldest record is dropped once the log is full.
///
/// # Example
///
/// ```rust
/// use statewire::States;
///
/// let mut states = States::new();
/// states
///     .when("idle", "running", Some("start"), None)
///     .unwrap()
///     .when("running", "done", Some("finish"), None)
///     .unwrap();
///
/// states.execute("start").unwrap();
/// states.execute("finish").unwrap();
///
/// assert_eq!(states.history().path(), vec!["idle", "running", "done"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateHistory {
    records: VecDeque<TransitionRecord>,
    capacity: Option<usize>,
    disabled: bool,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `capacity` records.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            disabled: false,
        }
    }

    /// History that never records anything.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, record: TransitionRecord) {
        if self.disabled {
            return;
        }
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Names of the states traversed: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time between the first and last retained record.
    ///
    /// Returns `None` when the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

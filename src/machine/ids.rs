//! Identifier generation for engines.
//!
//! Engines built with [`States::new`](crate::States::new) draw from one
//! process-wide [`SequentialIds`]. Callers that need numbering isolated from
//! other engines own a generator and pass it to
//! [`States::with_generator`](crate::States::with_generator).

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Prefix used by the default generators.
pub const DEFAULT_ID_PREFIX: &str = "states";

static DEFAULT_IDS: SequentialIds = SequentialIds::new();

/// Source of engine identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Monotonic `<prefix>_<N>` identifiers, starting at 1.
///
/// # Example
///
/// ```rust
/// use statewire::{IdGenerator, SequentialIds, States};
///
/// let ids = SequentialIds::with_prefix("order");
/// let first = States::with_generator(&ids);
/// let second = States::with_generator(&ids);
///
/// assert_eq!(first.id(), "order_1");
/// assert_eq!(second.id(), "order_2");
///
/// ids.reset();
/// assert_eq!(ids.next_id(), "order_1");
/// ```
#[derive(Debug)]
pub struct SequentialIds {
    prefix: Cow<'static, str>,
    issued: AtomicU64,
}

impl SequentialIds {
    pub const fn new() -> Self {
        Self {
            prefix: Cow::Borrowed(DEFAULT_ID_PREFIX),
            issued: AtomicU64::new(0),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Cow::Owned(prefix.into()),
            issued: AtomicU64::new(0),
        }
    }

    /// Restart numbering; the next id issued ends in `_1`.
    pub fn reset(&self) {
        self.issued.store(0, Ordering::SeqCst);
    }

    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}_{}", self.prefix, n)
    }
}

/// Random `<prefix>_<uuid>` identifiers.
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        format!("{}_{}", self.prefix, Uuid::new_v4().simple())
    }
}

/// Draw from the process-wide sequence.
pub(crate) fn next_default_id() -> String {
    DEFAULT_IDS.next_id()
}

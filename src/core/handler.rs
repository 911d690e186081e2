//! Callback capabilities invoked when transitions are traversed.
//!
//! Two shapes exist:
//! - [`Handler`]: attached to one transition, may fail and abort the traversal
//! - [`Subscriber`]: attached to the whole engine, observes every traversal
//!
//! Both are cheap to clone. Clones share identity, which is what duplicate
//! detection in `when` and `subscribe(.., single = true)` compares.

use super::transition::Transition;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by a transition handler.
///
/// Returning it from a handler aborts the traversal in progress: remaining
/// handlers are skipped and the current state does not move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type HandlerFn = dyn Fn(&Transition) -> Result<(), HandlerError> + Send + Sync;
type SubscriberFn = dyn Fn(&Transition) + Send + Sync;

/// Callback attached to a single transition.
///
/// # Example
///
/// ```rust
/// use statewire::{Handler, HandlerError, States};
///
/// let guard = Handler::new(|t| {
///     if t.to().name() == "forbidden" {
///         Err(HandlerError::new("not allowed"))
///     } else {
///         Ok(())
///     }
/// });
///
/// let mut states = States::new();
/// states.when("a", "forbidden", Some("go"), Some(guard)).unwrap();
///
/// assert!(states.execute("go").is_err());
/// assert_eq!(states.current(), Some("a"));
/// ```
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wrap a fallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Transition) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        Self::new(move |transition| {
            f(transition);
            Ok(())
        })
    }

    pub fn call(&self, transition: &Transition) -> Result<(), HandlerError> {
        (self.0)(transition)
    }

    /// Whether both values wrap the same callback allocation.
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Callback notified of every traversal the engine performs.
#[derive(Clone)]
pub struct Subscriber(Arc<SubscriberFn>);

impl Subscriber {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, transition: &Transition) {
        (self.0)(transition)
    }

    /// Whether both values wrap the same callback allocation.
    pub fn same_as(&self, other: &Subscriber) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscriber({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

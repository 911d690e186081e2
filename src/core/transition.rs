//! Directed edges between registered states.

use super::handler::{Handler, HandlerError};
use super::meta::StateMeta;
use std::fmt;
use std::sync::Arc;

/// A directed edge `(from, to, action)` with an ordered list of handlers.
///
/// Endpoints are shared with the engine's state collection. The action is
/// optional: an action-less edge can only be traversed with
/// [`States::change`](crate::States::change).
///
/// Only the handler list is mutable, and only through the engine.
#[derive(Clone, Debug)]
pub struct Transition {
    from: Arc<StateMeta>,
    to: Arc<StateMeta>,
    action: Option<String>,
    handlers: Vec<Handler>,
}

impl Transition {
    pub(crate) fn new(
        from: Arc<StateMeta>,
        to: Arc<StateMeta>,
        action: Option<String>,
        handler: Option<Handler>,
    ) -> Self {
        Self {
            from,
            to,
            action,
            handlers: handler.into_iter().collect(),
        }
    }

    /// The state this edge leaves.
    pub fn from(&self) -> &StateMeta {
        &self.from
    }

    /// The state this edge enters.
    pub fn to(&self) -> &StateMeta {
        &self.to
    }

    pub(crate) fn from_meta(&self) -> &Arc<StateMeta> {
        &self.from
    }

    pub(crate) fn to_meta(&self) -> &Arc<StateMeta> {
        &self.to
    }

    /// The action name, if the edge has one.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Whether this edge joins the named endpoints under the given action.
    pub(crate) fn connects(&self, from: &str, to: &str, action: Option<&str>) -> bool {
        self.from.is_equal(from) && self.to.is_equal(to) && self.action() == action
    }

    pub(crate) fn has_handler(&self, handler: &Handler) -> bool {
        self.handlers.iter().any(|h| h.same_as(handler))
    }

    pub(crate) fn append(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    pub(crate) fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Invoke every handler in append order, stopping at the first failure.
    pub(crate) fn run_handlers(&self) -> Result<(), HandlerError> {
        for (index, handler) in self.handlers.iter().enumerate() {
            tracing::trace!(transition = %self, index, "invoking transition handler");
            handler.call(self)?;
        }
        Ok(())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] -> [{}] on: [{}]",
            self.from,
            self.to,
            self.action.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn meta(name: &str) -> Arc<StateMeta> {
        Arc::new(StateMeta::new(name))
    }

    #[test]
    fn display_renders_endpoints_and_action() {
        let transition = Transition::new(meta("idle"), meta("running"), Some("start".into()), None);
        assert_eq!(transition.to_string(), "[idle] -> [running] on: [start]");
    }

    #[test]
    fn display_renders_missing_action_as_empty() {
        let transition = Transition::new(meta("idle"), meta("running"), None, None);
        assert_eq!(transition.to_string(), "[idle] -> [running] on: []");
    }

    #[test]
    fn new_without_handler_has_empty_list() {
        let transition = Transition::new(meta("a"), meta("b"), None, None);
        assert!(transition.handlers().is_empty());
    }

    #[test]
    fn connects_matches_all_three_parts() {
        let transition = Transition::new(meta("a"), meta("b"), Some("go".into()), None);

        assert!(transition.connects("a", "b", Some("go")));
        assert!(!transition.connects("a", "b", None));
        assert!(!transition.connects("b", "a", Some("go")));
        assert!(!transition.connects("a", "c", Some("go")));
    }

    #[test]
    fn self_loop_is_detected() {
        let a = meta("a");
        let looped = Transition::new(Arc::clone(&a), a, Some("tick".into()), None);
        let edge = Transition::new(meta("a"), meta("b"), None, None);

        assert!(looped.is_self_loop());
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn handlers_run_in_append_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&order);
        let second = Arc::clone(&order);

        let mut transition = Transition::new(
            meta("a"),
            meta("b"),
            Some("go".into()),
            Some(Handler::infallible(move |_| first.lock().unwrap().push(1))),
        );
        transition.append(Handler::infallible(move |_| second.lock().unwrap().push(2)));

        transition.run_handlers().unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn failing_handler_stops_the_chain() {
        let ran_last = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran_last);

        let mut transition = Transition::new(meta("a"), meta("b"), None, None);
        transition.append(Handler::new(|_| Err(HandlerError::new("stop"))));
        transition.append(Handler::infallible(move |_| *flag.lock().unwrap() = true));

        let err = transition.run_handlers().unwrap_err();
        assert_eq!(err.message(), "stop");
        assert!(!*ran_last.lock().unwrap());
    }

    #[test]
    fn has_handler_uses_identity() {
        let handler = Handler::infallible(|_| {});
        let other = Handler::infallible(|_| {});
        let transition = Transition::new(meta("a"), meta("b"), None, Some(handler.clone()));

        assert!(transition.has_handler(&handler));
        assert!(!transition.has_handler(&other));
    }

    #[test]
    fn clear_handlers_empties_list() {
        let mut transition =
            Transition::new(meta("a"), meta("b"), None, Some(Handler::infallible(|_| {})));
        transition.clear_handlers();
        assert!(transition.handlers().is_empty());
    }
}

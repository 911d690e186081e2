//! The transition engine.

use super::config::StatesConfig;
use super::error::StatesError;
use super::ids::{next_default_id, IdGenerator};
use super::subscription::{SubscriptionKey, Subscriptions};
use crate::core::{Handler, StateHistory, StateMeta, Subscriber, Transition, TransitionRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Action carried by the terminal transition subscribers receive on dispose.
pub const DISPOSE_ACTION: &str = "states_reserved_action_dispose";

/// Finite state machine over named states and actions.
///
/// States and transitions are registered with [`add`](Self::add) and
/// [`when`](Self::when); the first registered state becomes current. The
/// machine is driven with [`change`](Self::change) (by target state) or
/// [`execute`](Self::execute) (by action). Each traversal runs the
/// transition's handlers, moves the current state, records the traversal
/// and notifies every subscriber, in that order.
///
/// # Example
///
/// ```rust
/// use statewire::{States, StatesError};
///
/// fn main() -> Result<(), StatesError> {
///     let mut states = States::new();
///     states
///         .when("idle", "running", Some("start"), None)?
///         .when("running", "done", Some("finish"), None)?;
///
///     assert_eq!(states.current(), Some("idle"));
///     assert!(!states.execute("finish")?);
///     assert!(states.execute("start")?);
///     assert!(states.execute("finish")?);
///     assert_eq!(states.current(), Some("done"));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct States {
    id: String,
    metas: Vec<Arc<StateMeta>>,
    transitions: Vec<Transition>,
    current: Option<Arc<StateMeta>>,
    subscribers: Subscriptions,
    lock_token: String,
    history: StateHistory,
}

impl States {
    /// Create an engine with an id from the process-wide sequence
    /// (`states_1`, `states_2`, ...).
    pub fn new() -> Self {
        Self::with_id(next_default_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metas: Vec::new(),
            transitions: Vec::new(),
            current: None,
            subscribers: Subscriptions::default(),
            lock_token: String::new(),
            history: StateHistory::new(),
        }
    }

    /// Create an engine whose id comes from a caller-owned generator.
    pub fn with_generator<G: IdGenerator + ?Sized>(ids: &G) -> Self {
        Self::with_id(ids.next_id())
    }

    pub fn from_config(config: StatesConfig) -> Self {
        let mut states = match config.id {
            Some(id) => Self::with_id(id),
            None => Self::new(),
        };
        states.history = match (config.history.enabled, config.history.capacity) {
            (false, _) => StateHistory::disabled(),
            (true, Some(capacity)) => StateHistory::bounded(capacity),
            (true, None) => StateHistory::new(),
        };
        states
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the current state, if any state is registered.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref().map(StateMeta::name)
    }

    pub fn current_meta(&self) -> Option<&Arc<StateMeta>> {
        self.current.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        !self.lock_token.is_empty()
    }

    /// Snapshot copy of every transition, in registration order.
    pub fn all(&self) -> Vec<Transition> {
        self.transitions.clone()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Registered states, in registration order.
    pub fn states(&self) -> &[Arc<StateMeta>] {
        &self.metas
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Register a state.
    ///
    /// Returns `Ok(None)` when a state with this name already exists. The
    /// first state registered on an empty engine becomes current.
    ///
    /// # Errors
    ///
    /// [`StatesError::Locked`] if the engine is locked.
    pub fn add(&mut self, name: &str) -> Result<Option<Arc<StateMeta>>, StatesError> {
        self.ensure_unlocked()?;
        if self.has(None, Some(name), true) {
            return Ok(None);
        }
        Ok(Some(self.register(name)))
    }

    /// Wire a transition, registering missing endpoints on the way.
    ///
    /// An identical edge (same endpoints, same action) that already carries
    /// `handler` is left as is. Without a handler the duplicate check never
    /// matches, so repeated handler-less wiring adds parallel edges.
    ///
    /// Returns the engine for chaining.
    ///
    /// # Errors
    ///
    /// [`StatesError::Locked`] if the engine is locked.
    pub fn when(
        &mut self,
        from: &str,
        to: &str,
        action: Option<&str>,
        handler: Option<Handler>,
    ) -> Result<&mut Self, StatesError> {
        self.ensure_unlocked()?;

        let duplicate = handler.as_ref().is_some_and(|handler| {
            self.transitions
                .iter()
                .any(|t| t.connects(from, to, action) && t.has_handler(handler))
        });
        if duplicate {
            return Ok(self);
        }

        let from_meta = self.find_or_register(from);
        let to_meta = self.find_or_register(to);
        let transition = Transition::new(from_meta, to_meta, action.map(str::to_string), handler);
        debug!(states = %self.id, %transition, "transition wired");
        self.transitions.push(transition);

        Ok(self)
    }

    /// Existence query over actions and state names.
    ///
    /// Without an action, the action clause holds iff a state name was
    /// given; without a state name, the state clause copies the action
    /// clause. `conform` joins the clauses with AND, otherwise OR.
    pub fn has(&self, action: Option<&str>, state: Option<&str>, conform: bool) -> bool {
        let action_exists = match action {
            Some(action) => self.find_by_action(action).is_some(),
            None => state.is_some(),
        };
        let state_exists = match state {
            Some(state) => self.find_meta(state).is_some(),
            None => action_exists,
        };

        if conform {
            action_exists && state_exists
        } else {
            action_exists || state_exists
        }
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.has(None, Some(name), true)
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.has(Some(action), None, true)
    }

    /// Transitions leaving `from`, or the current state when `from` is
    /// `None`. An unknown name yields nothing.
    pub fn actions(&self, from: Option<&str>) -> Vec<&Transition> {
        match self.base(from) {
            Some(base) => self
                .transitions
                .iter()
                .filter(|t| Arc::ptr_eq(t.from_meta(), &base))
                .collect(),
            None => Vec::new(),
        }
    }

    /// States reachable in one step from `from`, or from the current state
    /// when `from` is `None`.
    pub fn metas(&self, from: Option<&str>) -> Vec<Arc<StateMeta>> {
        self.actions(from)
            .into_iter()
            .map(|t| Arc::clone(t.to_meta()))
            .collect()
    }

    /// First transition registered under `action`.
    pub fn get(&self, action: &str) -> Option<&Transition> {
        self.find_by_action(action)
    }

    /// Move to `state` along the first edge leaving the current state that
    /// enters it.
    ///
    /// Returns `Ok(false)` if the state is unknown or no such edge exists.
    /// With `run == false` the edge's handlers are skipped; subscribers are
    /// still notified.
    ///
    /// # Errors
    ///
    /// [`StatesError::Handler`] if a handler fails. The current state is
    /// left unchanged and subscribers are not notified.
    pub fn change(&mut self, state: &str, run: bool) -> Result<bool, StatesError> {
        if !self.has(None, Some(state), true) {
            return Ok(false);
        }
        let Some(current) = self.current.clone() else {
            return Ok(false);
        };
        let index = self
            .transitions
            .iter()
            .position(|t| Arc::ptr_eq(t.from_meta(), &current) && t.to().is_equal(state));

        match index {
            Some(index) => self.traverse(index, run).map(|()| true),
            None => Ok(false),
        }
    }

    /// Perform `action` from the current state, always running handlers.
    ///
    /// Returns `Ok(false)` if no edge leaving the current state carries
    /// this action.
    ///
    /// # Errors
    ///
    /// [`StatesError::Handler`] if a handler fails. The current state is
    /// left unchanged and subscribers are not notified.
    pub fn execute(&mut self, action: &str) -> Result<bool, StatesError> {
        let Some(current) = self.current.clone() else {
            return Ok(false);
        };
        let index = self
            .transitions
            .iter()
            .position(|t| Arc::ptr_eq(t.from_meta(), &current) && t.action() == Some(action));

        match index {
            Some(index) => self.traverse(index, true).map(|()| true),
            None => {
                debug!(states = %self.id, action, current = %current, "no transition for action");
                Ok(false)
            }
        }
    }

    /// Append `handler` to the first transition registered under `action`.
    ///
    /// Returns whether such a transition exists.
    pub fn on(&mut self, action: &str, handler: Handler) -> bool {
        match self
            .transitions
            .iter_mut()
            .find(|t| t.action() == Some(action))
        {
            Some(transition) => {
                transition.append(handler);
                true
            }
            None => false,
        }
    }

    /// Observe every traversal.
    ///
    /// With `single`, a subscriber that is already registered is not added
    /// again and `None` is returned.
    pub fn subscribe(&mut self, subscriber: Subscriber, single: bool) -> Option<SubscriptionKey> {
        let key = self.subscribers.insert(subscriber, single);
        match &key {
            Some(key) => debug!(states = %self.id, %key, "subscriber added"),
            None => debug!(states = %self.id, "subscriber already registered"),
        }
        key
    }

    pub fn unsubscribe(&mut self, key: &SubscriptionKey) -> bool {
        self.subscribers.remove(key)
    }

    /// Freeze the topology until [`unlock`](Self::unlock) is called with the
    /// same token.
    ///
    /// # Errors
    ///
    /// [`StatesError::MissingLockToken`] if `token` is empty.
    pub fn lock(&mut self, token: &str) -> Result<(), StatesError> {
        if token.is_empty() {
            return Err(StatesError::MissingLockToken);
        }
        self.lock_token = token.to_string();
        debug!(states = %self.id, "topology locked");
        Ok(())
    }

    /// Release the lock. A token that does not match is ignored.
    pub fn unlock(&mut self, token: &str) {
        if self.lock_token == token {
            self.lock_token.clear();
            debug!(states = %self.id, "topology unlocked");
        }
    }

    /// Return to the first registered state.
    pub fn reset(&mut self) {
        self.current = self.metas.first().cloned();
    }

    /// Tear the machine down.
    ///
    /// Handlers are dropped, every subscriber receives one terminal
    /// transition `(current, current, DISPOSE_ACTION)`, then subscribers,
    /// transitions, states, history and the current state are cleared. The
    /// id and the lock are kept; an unlocked engine can be rebuilt.
    pub fn dispose(&mut self) {
        for transition in &mut self.transitions {
            transition.clear_handlers();
        }

        match &self.current {
            Some(current) => {
                let terminal = Transition::new(
                    Arc::clone(current),
                    Arc::clone(current),
                    Some(DISPOSE_ACTION.to_string()),
                    None,
                );
                self.subscribers.notify(&terminal);
            }
            None => debug!(states = %self.id, "no current state, skipping dispose notification"),
        }

        self.subscribers.clear();
        self.transitions.clear();
        self.metas.clear();
        self.current = None;
        self.history.clear();
        debug!(states = %self.id, "disposed");
    }

    fn ensure_unlocked(&self) -> Result<(), StatesError> {
        if self.is_locked() {
            return Err(StatesError::Locked {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    fn find_meta(&self, name: &str) -> Option<&Arc<StateMeta>> {
        self.metas.iter().find(|meta| meta.is_equal(name))
    }

    fn find_by_action(&self, action: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.action() == Some(action))
    }

    fn base(&self, from: Option<&str>) -> Option<Arc<StateMeta>> {
        match from {
            Some(name) => self.find_meta(name).cloned(),
            None => self.current.clone(),
        }
    }

    fn register(&mut self, name: &str) -> Arc<StateMeta> {
        let meta = Arc::new(StateMeta::new(name));
        self.metas.push(Arc::clone(&meta));
        if self.metas.len() == 1 {
            self.current = Some(Arc::clone(&meta));
        }
        debug!(states = %self.id, state = name, "state registered");
        meta
    }

    fn find_or_register(&mut self, name: &str) -> Arc<StateMeta> {
        match self.find_meta(name) {
            Some(meta) => Arc::clone(meta),
            None => self.register(name),
        }
    }

    /// Run handlers, move the current state, record, then notify.
    fn traverse(&mut self, index: usize, run: bool) -> Result<(), StatesError> {
        let transition = &self.transitions[index];

        if run {
            if let Err(source) = transition.run_handlers() {
                warn!(states = %self.id, %transition, error = %source, "transition handler failed");
                return Err(StatesError::Handler {
                    transition: transition.to_string(),
                    source,
                });
            }
        }

        self.current = Some(Arc::clone(transition.to_meta()));
        self.history.record(TransitionRecord::capture(transition));
        debug!(states = %self.id, %transition, "transitioned");
        self.subscribers.notify(transition);
        Ok(())
    }
}

impl Default for States {
    fn default() -> Self {
        Self::new()
    }
}

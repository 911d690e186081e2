//! Statewire: a string-keyed finite state machine
//!
//! States and actions are plain names. Callers wire transitions between
//! states, drive the machine by target state or by action, and observe
//! traversals through per-transition handlers and engine-wide subscribers.
//!
//! # Core Concepts
//!
//! - **State**: a named node, see [`StateMeta`]
//! - **Transition**: a directed edge with an optional action and ordered
//!   handlers, see [`Transition`]
//! - **Engine**: owns the graph, the current state and the subscribers, see
//!   [`States`]
//!
//! # Example
//!
//! ```rust
//! use statewire::{Handler, States, Subscriber};
//! use std::sync::{Arc, Mutex};
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//!
//! let mut states = States::new();
//! states
//!     .when("green", "yellow", Some("slow"), None)
//!     .unwrap()
//!     .when("yellow", "red", Some("stop"), None)
//!     .unwrap()
//!     .when("red", "green", Some("go"), Some(Handler::infallible(|t| {
//!         assert_eq!(t.to().name(), "green");
//!     })))
//!     .unwrap();
//!
//! states.subscribe(
//!     Subscriber::new(move |t| sink.lock().unwrap().push(t.to_string())),
//!     false,
//! );
//!
//! states.execute("slow").unwrap();
//! states.execute("stop").unwrap();
//! states.execute("go").unwrap();
//!
//! assert_eq!(states.current(), Some("green"));
//! assert_eq!(log.lock().unwrap().len(), 3);
//! ```

pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    Handler, HandlerError, StateHistory, StateMeta, Subscriber, Transition, TransitionRecord,
};
pub use crate::machine::{
    HistoryConfig, IdGenerator, SequentialIds, States, StatesConfig, StatesError, SubscriptionKey,
    UuidIds, DISPOSE_ACTION,
};

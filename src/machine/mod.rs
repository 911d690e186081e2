//! The engine that owns and drives the state graph.
//!
//! # Key Concepts
//!
//! - **Topology**: states and transitions, registered with `add` and `when`
//! - **Traversal**: `change` by target state, `execute` by action
//! - **Observation**: transition handlers and engine-wide subscribers
//! - **Lifecycle**: `lock`/`unlock` freeze the topology, `dispose` tears down
//!
//! Everything is synchronous. Handlers and subscribers run in-line, in
//! registration order, on the caller's thread.

mod config;
mod error;
mod ids;
mod states;
mod subscription;

pub use config::{HistoryConfig, StatesConfig};
pub use error::StatesError;
pub use ids::{IdGenerator, SequentialIds, UuidIds, DEFAULT_ID_PREFIX};
pub use states::{States, DISPOSE_ACTION};
pub use subscription::SubscriptionKey;

//! Core data model of the state machine.
//!
//! - State tokens via [`StateMeta`]
//! - Directed edges via [`Transition`]
//! - Callback capabilities via [`Handler`] and [`Subscriber`]
//! - Traversal log via [`StateHistory`]
//!
//! Nothing here drives the machine; the engine in [`crate::machine`] owns
//! these values and decides when they change.

mod handler;
mod history;
mod meta;
mod transition;

pub use handler::{Handler, HandlerError, Subscriber};
pub use history::{StateHistory, TransitionRecord};
pub use meta::StateMeta;
pub use transition::Transition;

//! Engine error types.

use crate::core::HandlerError;
use thiserror::Error;

/// Errors raised by engine operations.
///
/// Routine absence (unknown state, unknown action, no matching edge) is not
/// an error; those outcomes are reported through `bool` and `Option`.
#[derive(Debug, Error)]
pub enum StatesError {
    /// Topology mutation attempted while the engine is locked
    #[error("states '{id}' is locked")]
    Locked { id: String },

    /// `lock` was called with an empty token
    #[error("lock token must be defined")]
    MissingLockToken,

    /// A transition handler failed; the current state was left unchanged
    #[error("handler failed on {transition}: {source}")]
    Handler {
        transition: String,
        #[source]
        source: HandlerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn locked_message_names_engine() {
        let err = StatesError::Locked {
            id: "states_1".to_string(),
        };
        assert_eq!(err.to_string(), "states 'states_1' is locked");
    }

    #[test]
    fn handler_error_is_exposed_as_source() {
        let err = StatesError::Handler {
            transition: "[a] -> [b] on: [go]".to_string(),
            source: HandlerError::new("boom"),
        };

        assert_eq!(err.to_string(), "handler failed on [a] -> [b] on: [go]: boom");
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
    }
}

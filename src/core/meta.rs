//! Named state tokens.
//!
//! A `StateMeta` is the immutable identity of one node in the graph. The
//! engine owns every meta it registers and hands out shared references to
//! transitions and callers.

use std::fmt;

/// Immutable named token representing one registered state.
///
/// Equality is by name. Metas are created by the engine when a state is
/// registered through [`States::add`](crate::States::add) or implicitly by
/// [`States::when`](crate::States::when).
///
/// # Example
///
/// ```rust
/// use statewire::States;
///
/// let mut states = States::with_id("doc");
/// let idle = states.add("idle").unwrap().unwrap();
///
/// assert_eq!(idle.name(), "idle");
/// assert!(idle.is_equal("idle"));
/// assert_eq!(idle.to_string(), "idle");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateMeta {
    name: String,
}

impl StateMeta {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this state carries the given name.
    pub fn is_equal(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for StateMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_preserved() {
        let meta = StateMeta::new("running");
        assert_eq!(meta.name(), "running");
    }

    #[test]
    fn is_equal_compares_by_name() {
        let meta = StateMeta::new("running");
        assert!(meta.is_equal("running"));
        assert!(!meta.is_equal("Running"));
        assert!(!meta.is_equal(""));
    }

    #[test]
    fn metas_with_same_name_are_equal() {
        assert_eq!(StateMeta::new("a"), StateMeta::new("a"));
        assert_ne!(StateMeta::new("a"), StateMeta::new("b"));
    }

    #[test]
    fn display_renders_name() {
        assert_eq!(StateMeta::new("done").to_string(), "done");
    }
}

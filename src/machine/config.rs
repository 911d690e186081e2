//! Construction options for an engine.

use serde::{Deserialize, Serialize};

/// Traversal history settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Record traversals at all
    pub enabled: bool,

    /// Keep at most this many records; unbounded when absent
    pub capacity: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
        }
    }
}

/// Options accepted by [`States::from_config`](crate::States::from_config).
///
/// Every field has a default, so an empty document is a valid config.
///
/// # Example
///
/// ```rust
/// use statewire::{States, StatesConfig};
///
/// let config = StatesConfig {
///     id: Some("checkout".to_string()),
///     ..StatesConfig::default()
/// };
///
/// let states = States::from_config(config);
/// assert_eq!(states.id(), "checkout");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatesConfig {
    /// Explicit engine id; one is minted when absent
    pub id: Option<String>,

    pub history: HistoryConfig,
}

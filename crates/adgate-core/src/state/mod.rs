//! Session ad-state and its persistent store.

pub mod storage;
pub mod store;

use serde::{Deserialize, Serialize};

pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{is_owned_key, AdStateStore};

/// Counters for one browser session. Only the gating evaluator mutates
/// them, and only after an impression actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionAdState {
    pub shown_count: u32,
    /// Unix seconds of the last recorded impression.
    pub last_shown_at: Option<u64>,
}

impl SessionAdState {
    pub const ZERO: SessionAdState = SessionAdState {
        shown_count: 0,
        last_shown_at: None,
    };
}

//! QA switches read from the query string: force ads on, or wipe the
//! session counters. Neither touches unrelated state.

use tracing::info;

use crate::config::DebugConfig;
use crate::errors::StorageError;
use crate::gating::AdGate;
use crate::state::{AdStateStore, KeyValueStorage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugSwitches {
    pub force_ads: bool,
    pub reset_counters: bool,
}

impl DebugSwitches {
    /// Parse from a query string or full URL. A bare key
    /// (`?ads_debug`) counts as on.
    pub fn from_query(query: &str, config: &DebugConfig) -> Self {
        let query = match query.find('?') {
            Some(i) => &query[i + 1..],
            None => query,
        };
        let query = query.split('#').next().unwrap_or("");

        let mut switches = Self::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            if key == config.force_param {
                switches.force_ads = is_truthy(value);
            } else if key == config.reset_param {
                switches.reset_counters = is_truthy(value);
            }
        }
        switches
    }

    /// Gate honoring the force switch, if the config permits forcing.
    pub fn gate(&self, config: &DebugConfig) -> AdGate {
        AdGate {
            debug_force: self.force_ads && config.allow_force,
        }
    }

    /// Clear the store when the reset switch is on. Returns the number of
    /// keys removed, or `None` if the switch was off.
    pub fn apply_reset<S: KeyValueStorage>(
        &self,
        store: &AdStateStore<S>,
    ) -> Result<Option<usize>, StorageError> {
        if !self.reset_counters {
            return Ok(None);
        }
        let removed = store.clear()?;
        info!(removed, "Ad counters reset by debug switch");
        Ok(Some(removed))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "1" | "true" | "yes" | "on"
    )
}

//! AdStateStore: namespaced read/write/clear of one session's ad counters.
//!
//! Read-modify-write with no cross-tab coordination. Two tabs sharing the
//! same storage can race on `write`, so `shown_count` is only eventually
//! consistent across tabs.

use tracing::{debug, info, warn};

use crate::constants::{COUNT_KEY_PREFIX, LAST_KEY_PREFIX, SESSION_KEY};
use crate::errors::StorageError;

use super::storage::KeyValueStorage;
use super::SessionAdState;

enum ReadFailure {
    Corrupt { key: String, value: String },
    Storage(StorageError),
}

impl From<StorageError> for ReadFailure {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Session ad-state persisted under the `ad.` key namespace.
pub struct AdStateStore<S> {
    storage: S,
    session_id: String,
}

impl<S: KeyValueStorage> AdStateStore<S> {
    /// Resume the session recorded under `ad.session`, or start and persist
    /// a new one.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let existing = storage
            .get(SESSION_KEY)?
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let session_id = match existing {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                storage.set(SESSION_KEY, &id)?;
                debug!(session_id = %id, "Started new ad session");
                id
            }
        };
        Ok(Self {
            storage,
            session_id,
        })
    }

    /// Bind to an explicit session id without touching storage.
    pub fn with_session(storage: S, session_id: impl Into<String>) -> Self {
        Self {
            storage,
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn count_key(&self) -> String {
        format!("{COUNT_KEY_PREFIX}{}", self.session_id)
    }

    fn last_key(&self) -> String {
        format!("{LAST_KEY_PREFIX}{}", self.session_id)
    }

    /// Current state. Missing entries, corrupt entries and storage
    /// failures all yield [`SessionAdState::ZERO`].
    pub fn read(&self) -> SessionAdState {
        match self.try_read() {
            Ok(state) => state,
            Err(ReadFailure::Corrupt { key, value }) => {
                warn!(
                    session_id = %self.session_id,
                    key = %key,
                    value = %value,
                    "Corrupt ad state, resetting to zero"
                );
                SessionAdState::ZERO
            }
            Err(ReadFailure::Storage(e)) => {
                warn!(
                    session_id = %self.session_id,
                    error = %e,
                    "Ad state unreadable, using zero state"
                );
                SessionAdState::ZERO
            }
        }
    }

    fn try_read(&self) -> Result<SessionAdState, ReadFailure> {
        let count_key = self.count_key();
        let shown_count = match self.storage.get(&count_key)? {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| ReadFailure::Corrupt {
                key: count_key,
                value: raw,
            })?,
            None => 0,
        };

        let last_key = self.last_key();
        let last_shown_at = match self.storage.get(&last_key)? {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ReadFailure::Corrupt {
                key: last_key,
                value: raw,
            })?),
            None => None,
        };

        Ok(SessionAdState {
            shown_count,
            last_shown_at,
        })
    }

    /// Persist `state` in one batch. The timestamp goes ahead of the count,
    /// so a write cut short never pairs a new count with a stale
    /// `last_shown_at`. Also re-records the session id, which a prior
    /// `clear` removes.
    pub fn write(&self, state: &SessionAdState) -> Result<(), StorageError> {
        let count_key = self.count_key();
        let last_key = self.last_key();
        let count = state.shown_count.to_string();
        match state.last_shown_at {
            Some(ts) => {
                let ts = ts.to_string();
                self.storage.set_many(&[
                    (SESSION_KEY, self.session_id.as_str()),
                    (last_key.as_str(), ts.as_str()),
                    (count_key.as_str(), count.as_str()),
                ])
            }
            None => {
                self.storage.remove(&last_key)?;
                self.storage.set_many(&[
                    (SESSION_KEY, self.session_id.as_str()),
                    (count_key.as_str(), count.as_str()),
                ])
            }
        }
    }

    /// Remove every key this store owns and nothing else. Returns the
    /// number of keys removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let owned: Vec<String> = self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| is_owned_key(key))
            .collect();

        let mut removed = 0;
        for key in &owned {
            if self.storage.remove(key)? {
                removed += 1;
            }
        }
        info!(session_id = %self.session_id, removed, "Cleared ad state");
        Ok(removed)
    }
}

/// True for keys in the ad-state namespace.
pub fn is_owned_key(key: &str) -> bool {
    key == SESSION_KEY || key.starts_with(COUNT_KEY_PREFIX) || key.starts_with(LAST_KEY_PREFIX)
}

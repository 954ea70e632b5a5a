//! Persistence bridge: snapshot/restore of raw state.
//!
//! Serializes the `{habits, completions}` portion of in-memory state to the
//! local durable store and restores it on process start. Derived data is
//! never written; progress is always recomputed.

use std::sync::Arc;

use crate::domain::habit::StateSnapshot;
use crate::ports::{LocalStore, LocalStoreError};

/// Default key the snapshot blob is stored under.
pub const SNAPSHOT_KEY: &str = "habit-state";

/// Bridge between the in-memory cache and the local durable store.
pub struct PersistenceBridge {
    store: Arc<dyn LocalStore>,
    key: String,
}

impl PersistenceBridge {
    /// Creates a bridge using the default snapshot key.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self::with_key(store, SNAPSHOT_KEY)
    }

    /// Creates a bridge with a custom snapshot key.
    pub fn with_key(store: Arc<dyn LocalStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Restores the last persisted snapshot.
    ///
    /// A missing, unreadable, or corrupt snapshot degrades to the empty
    /// state. Startup must never fail on a bad snapshot; the condition is
    /// logged and the engine starts fresh.
    pub async fn restore(&self) -> StateSnapshot {
        let blob = match self.store.get(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return StateSnapshot::empty(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "snapshot read failed, starting empty");
                return StateSnapshot::empty();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "corrupt snapshot, starting empty");
                StateSnapshot::empty()
            }
        }
    }

    /// Persists the snapshot, replacing the previous one.
    pub async fn persist(&self, snapshot: &StateSnapshot) -> Result<(), LocalStoreError> {
        // StateSnapshot serialization is infallible for these types; treat a
        // failure as an IO-class error all the same.
        let blob = serde_json::to_string(snapshot)
            .map_err(|err| LocalStoreError::Io(err.to_string()))?;
        self.store.set(&self.key, &blob).await
    }
}

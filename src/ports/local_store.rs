//! Local durable store port.
//!
//! Key-value get/set/remove over serialized blobs. Used by the persistence
//! bridge for state snapshots; embedding applications may reuse it for small
//! scalar settings.

use async_trait::async_trait;

/// Errors surfaced by the local store adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocalStoreError {
    #[error("IO error: {0}")]
    Io(String),
}

/// Port onto the on-device durable store.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    /// Writes `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    /// Removes the blob under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn LocalStore) {}
    }
}

// # Memory State Store
//
// In-memory implementation of StateStore. Nothing survives the process;
// used by tests and by one-shot runs that pass no state path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::state_store::{StateRecord, StateStore};

/// In-memory state store
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<HashMap<String, StateRecord>>>,
}

impl MemoryStateStore {
    /// Create a new empty memory state store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_record(&self, job_id: &str) -> Result<Option<StateRecord>, Error> {
        Ok(self.inner.read().await.get(job_id).cloned())
    }

    async fn set_record(&self, job_id: &str, record: &StateRecord) -> Result<(), Error> {
        self.inner
            .write()
            .await
            .insert(job_id.to_string(), record.clone());
        Ok(())
    }

    async fn delete_record(&self, job_id: &str) -> Result<(), Error> {
        self.inner.write().await.remove(job_id);
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<String>, Error> {
        let mut ids: Vec<String> = self.inner.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::TransferJobResource;

    fn record(description: &str) -> StateRecord {
        StateRecord::new(TransferJobResource {
            id: Some("123".to_string()),
            description: description.to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStateStore::new();
        assert!(store.is_empty().await);

        store.set_record("123", &record("nightly")).await.unwrap();
        assert_eq!(store.len().await, 1);

        let retrieved = store.get_record("123").await.unwrap().unwrap();
        assert_eq!(retrieved.resource.description, "nightly");

        store.delete_record("123").await.unwrap();
        assert!(store.get_record("123").await.unwrap().is_none());

        // Deleting again is fine
        store.delete_record("123").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = MemoryStateStore::new();
        let clone = store.clone();

        store.set_record("b", &record("two")).await.unwrap();
        clone.set_record("a", &record("one")).await.unwrap();

        assert_eq!(store.list_records().await.unwrap(), vec!["a", "b"]);
    }
}

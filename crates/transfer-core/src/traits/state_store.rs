// # State Store Trait
//
// Local record of the transfer jobs this tool manages, keyed by job id.
//
// ## Purpose
//
// The remote API is the source of truth. The store keeps the last declared
// record per job so `update` can diff a new configuration against it and so
// sensitive values the API never echoes back (the AWS secret key) survive a
// refresh.
//
// ## Implementations
//
// - Memory: `state::MemoryStateStore` (tests, one-shot runs)
// - File: `state::FileStateStore` (JSON file, atomic writes)

use async_trait::async_trait;

use crate::resource::TransferJobResource;

/// Stored record for one transfer job
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateRecord {
    /// Last known declarative record
    pub resource: TransferJobResource,
    /// Timestamp of the last write
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl StateRecord {
    /// Create a record stamped with the current time
    pub fn new(resource: TransferJobResource) -> Self {
        Self {
            resource,
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Trait for state store implementations
///
/// All methods must be safe to call concurrently from multiple tasks.
/// Stores perform I/O only; deciding what to create, patch or delete is the
/// controller's job.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the stored record for a job
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StateRecord))`: The stored record
    /// - `Ok(None)`: No record found
    /// - `Err(Error)`: Storage error
    async fn get_record(&self, job_id: &str) -> Result<Option<StateRecord>, crate::Error>;

    /// Create or replace the record for a job
    async fn set_record(&self, job_id: &str, record: &StateRecord) -> Result<(), crate::Error>;

    /// Delete a record
    ///
    /// Deleting a record that does not exist is not an error.
    async fn delete_record(&self, job_id: &str) -> Result<(), crate::Error>;

    /// List all job ids in the store
    async fn list_records(&self) -> Result<Vec<String>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;
}

// # Remote API Traits
//
// The controller and the CA-certs lookup only ever talk to Google through
// these traits. The REST implementations live in `transfer-provider-gcp`;
// tests substitute scripted fakes.
//
// ## Error contract
//
// Implementations map HTTP failures onto `crate::Error`:
//
// - 404 → `Error::NotFound`
// - 401 / 403 → `Error::Authentication`
// - 429 → `Error::RateLimited`
// - anything else → `Error::Api { code, .. }`
//
// The lifecycle relies on `Error::is_not_found` to turn a missing job into
// "absent" and on `Error::is_transient` to decide what create may retry.
//
// ## Usage
//
// ```rust,ignore
// use transfer_core::TransferJobsClient;
//
// let job = client.get_job("transferJobs/123", "my-project").await?;
// ```

use async_trait::async_trait;

use crate::Error;
use crate::model::{ListServerCasResponse, TransferJob, UpdateTransferJobRequest};

/// Storage Transfer API: the three calls a job's lifecycle needs
///
/// # Thread Safety
///
/// Implementations must be usable from multiple tasks at once.
#[async_trait]
pub trait TransferJobsClient: Send + Sync {
    /// Create a job; the returned job carries the server-assigned name
    async fn create_job(&self, job: &TransferJob) -> Result<TransferJob, Error>;

    /// Fetch a job by its `transferJobs/{id}` name within `project_id`
    async fn get_job(&self, name: &str, project_id: &str) -> Result<TransferJob, Error>;

    /// Patch the fields named by the request's field mask
    async fn patch_job(
        &self,
        name: &str,
        request: &UpdateTransferJobRequest,
    ) -> Result<TransferJob, Error>;

    /// Get the client name (for logging)
    fn client_name(&self) -> &'static str;
}

/// Cloud SQL Admin API: server CA certificates of an instance
#[async_trait]
pub trait SqlAdminClient: Send + Sync {
    async fn list_server_cas(
        &self,
        project: &str,
        instance: &str,
    ) -> Result<ListServerCasResponse, Error>;

    /// Get the client name (for logging)
    fn client_name(&self) -> &'static str;
}

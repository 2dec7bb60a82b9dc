// # Google REST Clients
//
// reqwest implementations of `TransferJobsClient` and `SqlAdminClient`.
//
// ## Scope
//
// - One HTTP request per trait call
// - Status codes mapped onto `transfer_core::Error`
// - NO retry or backoff (owned by the controller's `RetryPolicy`)
// - NO caching
//
// ## Security Requirements
//
// - The access token NEVER appears in logs or Debug output
// - Construction fails if the token is empty
//
// ## API Reference
//
// - Create job: POST `v1/transferJobs`
// - Get job: GET `v1/{name}?projectId={project}`
// - Patch job: PATCH `v1/{name}`
// - List server CAs: GET `sql/v1beta4/projects/{project}/instances/{instance}/listServerCas`

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use transfer_core::config::ProviderConfig;
use transfer_core::model::{ListServerCasResponse, TransferJob, UpdateTransferJobRequest};
use transfer_core::traits::{SqlAdminClient, TransferJobsClient};
use transfer_core::{Error, Result};

/// Authenticated JSON transport shared by both clients
#[derive(Clone)]
struct GoogleApi {
    /// API root, always ending in '/'
    base_url: String,

    /// OAuth2 bearer token
    /// ⚠️ NEVER log this value
    access_token: String,

    client: reqwest::Client,
}

impl fmt::Debug for GoogleApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleApi")
            .field("base_url", &self.base_url)
            .field("access_token", &"<REDACTED>")
            .finish()
    }
}

impl GoogleApi {
    fn new(base_url: &str, config: &ProviderConfig) -> Result<Self> {
        if config.access_token.is_empty() {
            return Err(Error::config("access token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            access_token: config.access_token.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.patch(self.url(path)).json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(map_status(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("Failed to read response body: {}", e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::Other(format!("Failed to parse response: {}", e)))
    }
}

/// Map a non-2xx status and its body onto the error taxonomy
pub fn map_status(status: u16, body: &str) -> Error {
    let message = google_error_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        401 | 403 => Error::auth(format!("Status {}: {}", status, message)),
        404 => Error::not_found(message),
        429 => Error::rate_limited(message),
        code => Error::api(code, message),
    }
}

/// Extract `error.message` from a Google JSON error body
fn google_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Storage Transfer v1 client
#[derive(Debug, Clone)]
pub struct StorageTransferRestClient {
    api: GoogleApi,
}

impl StorageTransferRestClient {
    /// Create a client against the configured Storage Transfer endpoint
    ///
    /// Fails if the access token is empty.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            api: GoogleApi::new(&config.endpoints.storage_transfer, config)?,
        })
    }
}

#[async_trait]
impl TransferJobsClient for StorageTransferRestClient {
    async fn create_job(&self, job: &TransferJob) -> Result<TransferJob> {
        tracing::debug!("POST transferJobs (project {})", job.project_id);
        self.api.post("transferJobs", job).await
    }

    async fn get_job(&self, name: &str, project_id: &str) -> Result<TransferJob> {
        tracing::debug!("GET {} (project {})", name, project_id);
        self.api.get(name, &[("projectId", project_id)]).await
    }

    async fn patch_job(&self, name: &str, request: &UpdateTransferJobRequest) -> Result<TransferJob> {
        tracing::debug!(
            "PATCH {} (mask {:?})",
            name,
            request.update_transfer_job_field_mask
        );
        self.api.patch(name, request).await
    }

    fn client_name(&self) -> &'static str {
        "storagetransfer-v1"
    }
}

/// Cloud SQL Admin v1beta4 client
#[derive(Debug, Clone)]
pub struct SqlAdminRestClient {
    api: GoogleApi,
}

impl SqlAdminRestClient {
    /// Create a client against the configured SQL Admin endpoint
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            api: GoogleApi::new(&config.endpoints.sql_admin, config)?,
        })
    }
}

#[async_trait]
impl SqlAdminClient for SqlAdminRestClient {
    async fn list_server_cas(&self, project: &str, instance: &str) -> Result<ListServerCasResponse> {
        let path = format!("projects/{}/instances/{}/listServerCas", project, instance);
        tracing::debug!("GET {}", path);
        self.api.get(&path, &[]).await
    }

    fn client_name(&self) -> &'static str {
        "sqladmin-v1beta4"
    }
}

//! Test doubles for the lifecycle contract tests
//!
//! The fakes behave like a tiny in-memory Storage Transfer / SQL Admin
//! backend, record every call, and can be scripted to fail the next calls.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use transfer_core::Error;
use transfer_core::error::Result;
use transfer_core::model::{
    GcsData, ListServerCasResponse, Schedule, SslCert, TransferJob, TransferJobStatus,
    TransferSpec, UpdateTransferJobRequest,
};
use transfer_core::resource::{
    DateBlock, GcsDataBlock, ScheduleBlock, TransferJobResource, TransferSpecBlock,
};
use transfer_core::traits::{SqlAdminClient, TransferJobsClient};

/// One recorded remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(TransferJob),
    Get { name: String, project: String },
    Patch { name: String, request: UpdateTransferJobRequest },
}

#[derive(Default)]
struct FakeState {
    jobs: HashMap<String, TransferJob>,
    next_id: u64,
    calls: Vec<Call>,
    create_failures: VecDeque<Error>,
    get_failures: VecDeque<Error>,
    patch_failures: VecDeque<Error>,
}

/// In-memory Storage Transfer backend
///
/// Clones share the same backend, so a test keeps one clone and hands the
/// other to the controller.
#[derive(Clone, Default)]
pub struct FakeTransferJobsClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransferJobsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing job
    pub fn insert_job(&self, job: TransferJob) {
        let mut state = self.state.lock().unwrap();
        state.jobs.insert(job.name.clone(), job);
    }

    pub fn job(&self, name: &str) -> Option<TransferJob> {
        self.state.lock().unwrap().jobs.get(name).cloned()
    }

    pub fn fail_creates(&self, errors: impl IntoIterator<Item = Error>) {
        self.state.lock().unwrap().create_failures.extend(errors);
    }

    pub fn fail_gets(&self, errors: impl IntoIterator<Item = Error>) {
        self.state.lock().unwrap().get_failures.extend(errors);
    }

    pub fn fail_patches(&self, errors: impl IntoIterator<Item = Error>) {
        self.state.lock().unwrap().patch_failures.extend(errors);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn patch_calls(&self) -> Vec<UpdateTransferJobRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Patch { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }
}

#[async_trait]
impl TransferJobsClient for FakeTransferJobsClient {
    async fn create_job(&self, job: &TransferJob) -> Result<TransferJob> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(job.clone()));
        if let Some(error) = state.create_failures.pop_front() {
            return Err(error);
        }

        state.next_id += 1;
        let mut created = job.clone();
        created.name = format!("transferJobs/{}", 1000 + state.next_id);
        created.creation_time = Some("2026-01-01T00:00:00Z".to_string());
        created.last_modification_time = created.creation_time.clone();
        // The API never echoes the AWS secret pair
        if let Some(s3) = created
            .transfer_spec
            .as_mut()
            .and_then(|spec| spec.aws_s3_data_source.as_mut())
        {
            s3.aws_access_key = None;
        }
        state.jobs.insert(created.name.clone(), created.clone());
        Ok(created)
    }

    async fn get_job(&self, name: &str, project_id: &str) -> Result<TransferJob> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get {
            name: name.to_string(),
            project: project_id.to_string(),
        });
        if let Some(error) = state.get_failures.pop_front() {
            return Err(error);
        }

        match state.jobs.get(name) {
            Some(job) if job.project_id == project_id => Ok(job.clone()),
            _ => Err(Error::not_found(format!("{} not found", name))),
        }
    }

    async fn patch_job(
        &self,
        name: &str,
        request: &UpdateTransferJobRequest,
    ) -> Result<TransferJob> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Patch {
            name: name.to_string(),
            request: request.clone(),
        });
        if let Some(error) = state.patch_failures.pop_front() {
            return Err(error);
        }

        let job = state
            .jobs
            .get_mut(name)
            .ok_or_else(|| Error::not_found(format!("{} not found", name)))?;
        let patch = &request.transfer_job;
        for field in request.update_transfer_job_field_mask.split(',') {
            match field {
                "description" => job.description = patch.description.clone(),
                "status" => {
                    job.status = patch.status;
                    if patch.status == Some(TransferJobStatus::Deleted) {
                        job.deletion_time = Some("2026-01-02T00:00:00Z".to_string());
                    }
                }
                "schedule" => job.schedule = patch.schedule.clone(),
                "transfer_spec" => job.transfer_spec = patch.transfer_spec.clone(),
                _ => {}
            }
        }
        job.last_modification_time = Some("2026-01-02T00:00:00Z".to_string());
        Ok(job.clone())
    }

    fn client_name(&self) -> &'static str {
        "fake-storage-transfer"
    }
}

/// SQL Admin fake returning a fixed response and counting calls
#[derive(Clone, Default)]
pub struct FakeSqlAdminClient {
    response: ListServerCasResponse,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeSqlAdminClient {
    pub fn with_certs(active_version: &str, fingerprints: &[&str]) -> Self {
        Self {
            response: ListServerCasResponse {
                active_version: active_version.to_string(),
                certs: fingerprints
                    .iter()
                    .map(|fp| SslCert {
                        cert: format!("-----BEGIN CERTIFICATE-----{}", fp),
                        common_name: format!("CN={}", fp),
                        create_time: "2026-01-01T00:00:00Z".to_string(),
                        expiration_time: "2036-01-01T00:00:00Z".to_string(),
                        sha1_fingerprint: fp.to_string(),
                        instance: "db-1".to_string(),
                    })
                    .collect(),
            },
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlAdminClient for FakeSqlAdminClient {
    async fn list_server_cas(&self, project: &str, instance: &str) -> Result<ListServerCasResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((project.to_string(), instance.to_string()));
        Ok(self.response.clone())
    }

    fn client_name(&self) -> &'static str {
        "fake-sql-admin"
    }
}

/// A minimal valid job record: start date and sink only
pub fn minimal_resource() -> TransferJobResource {
    TransferJobResource {
        description: "nightly backup".to_string(),
        project: Some("my-project".to_string()),
        schedule: Some(ScheduleBlock {
            schedule_start_date: Some(DateBlock {
                year: 2026,
                month: 1,
                day: 15,
            }),
            ..Default::default()
        }),
        transfer_spec: Some(TransferSpecBlock {
            gcs_data_sink: Some(GcsDataBlock {
                bucket_name: "sink-bucket".to_string(),
            }),
            gcs_data_source: Some(GcsDataBlock {
                bucket_name: "source-bucket".to_string(),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A remote job as the API would return it
pub fn remote_job(name: &str, project: &str) -> TransferJob {
    TransferJob {
        name: name.to_string(),
        description: "imported".to_string(),
        project_id: project.to_string(),
        status: Some(TransferJobStatus::Enabled),
        schedule: Some(Schedule {
            schedule_start_date: Some(transfer_core::model::Date {
                year: 2025,
                month: 6,
                day: 1,
            }),
            ..Default::default()
        }),
        transfer_spec: Some(TransferSpec {
            gcs_data_sink: Some(GcsData {
                bucket_name: "sink-bucket".to_string(),
            }),
            ..Default::default()
        }),
        creation_time: Some("2025-06-01T00:00:00Z".to_string()),
        ..Default::default()
    }
}

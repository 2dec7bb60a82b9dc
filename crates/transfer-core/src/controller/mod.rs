//! Transfer job lifecycle controller
//!
//! Orchestrates create / read / update / delete / import of one
//! `google_storage_transfer_job` against a [`TransferJobsClient`].
//!
//! ## Status machine
//!
//! ```text
//! ENABLED ⇄ DISABLED ──delete──▶ DELETED (terminal)
//! ```
//!
//! `DELETED` is only reachable through [`TransferJobController::delete`];
//! an update that plans it is rejected.
//!
//! ## Flow
//!
//! 1. Create: resolve project, build the full job, submit under the create
//!    retry policy, parse the job id from the returned name, then Read
//! 2. Read: fetch by name and project; not found means absent
//! 3. Update: diff prior vs planned, one patch scoped by a field mask; the
//!    project is fixed at creation
//! 4. Delete: patch `status = DELETED` under the delete retry policy
//!
//! Every read re-fetches. The controller holds no state between calls.

use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::convert::{expand_required, flatten_block};
use crate::error::{Error, Result};
use crate::identity::{extract_job_id, job_name, parse_import_id, resolve_project};
use crate::model::{TransferJob, TransferJobStatus, UpdateTransferJobRequest};
use crate::resource::{
    AwsAccessKeyBlock, ScheduleBlock, TRANSFER_JOB_RESOURCE, TransferJobResource, TransferSpecBlock,
};
use crate::retry::{RetryPolicy, retry};
use crate::schema::Validate;
use crate::spec::{assemble_spec, disassemble_spec};
use crate::traits::TransferJobsClient;

/// Field mask entries, in the order they are appended
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_SCHEDULE: &str = "schedule";
pub const FIELD_TRANSFER_SPEC: &str = "transfer_spec";

/// Result of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The job exists; every attribute reflects the remote response
    Found(TransferJobResource),
    /// The job no longer exists remotely
    Absent,
}

impl ReadOutcome {
    pub fn found(self) -> Option<TransferJobResource> {
        match self {
            Self::Found(resource) => Some(resource),
            Self::Absent => None,
        }
    }
}

/// A computed partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Changed fields, in mask order
    pub changed: Vec<&'static str>,
    /// Patch body carrying only the changed fields
    pub request: UpdateTransferJobRequest,
}

impl UpdatePlan {
    /// True when nothing changed and no patch should be sent
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// The comma-joined field mask
    pub fn field_mask(&self) -> &str {
        &self.request.update_transfer_job_field_mask
    }
}

/// Lifecycle controller for transfer jobs
pub struct TransferJobController {
    client: Box<dyn TransferJobsClient>,
    default_project: Option<String>,
    create_policy: RetryPolicy,
    delete_policy: RetryPolicy,
}

impl TransferJobController {
    /// Create a controller with the retry policies from `config`
    pub fn new(client: Box<dyn TransferJobsClient>, config: &ProviderConfig) -> Self {
        Self {
            client,
            default_project: config.project.clone(),
            create_policy: config.retry.create_policy(),
            delete_policy: config.retry.delete_policy(),
        }
    }

    /// Override the create and delete retry policies
    pub fn with_policies(mut self, create: RetryPolicy, delete: RetryPolicy) -> Self {
        self.create_policy = create;
        self.delete_policy = delete;
        self
    }

    /// Project for `resource`: its own, else the provider default
    pub fn project_for(&self, resource: &TransferJobResource) -> Result<String> {
        resolve_project(resource.project.as_deref(), self.default_project.as_deref())
    }

    /// Create the job and return its freshly read state
    pub async fn create(&self, planned: &TransferJobResource) -> Result<TransferJobResource> {
        planned.validate()?;
        let project = self.project_for(planned)?;
        let job = build_job(planned, &project)?;

        debug!(
            "Creating transfer job in project {} via {}",
            project,
            self.client.client_name()
        );
        let created = retry(&self.create_policy, "create transfer job", || {
            self.client.create_job(&job)
        })
        .await?;

        let job_id = extract_job_id(&created.name)?;
        info!("{}: created {} in project {}", TRANSFER_JOB_RESOURCE, job_id, project);

        let mut state = planned.clone();
        state.id = Some(job_id.clone());
        state.name = Some(created.name);
        state.project = Some(project);

        match self.read(&state).await? {
            ReadOutcome::Found(resource) => Ok(resource),
            ReadOutcome::Absent => Err(Error::not_found(format!(
                "transfer job {} not found right after creation",
                job_id
            ))),
        }
    }

    /// Fetch the job named by `prior` and rebuild its record
    ///
    /// The AWS secret pair is never echoed by the API; when the response's
    /// S3 source has no key, the one from `prior` is kept.
    pub async fn read(&self, prior: &TransferJobResource) -> Result<ReadOutcome> {
        let name = resource_name(prior)?;
        let project = self.project_for(prior)?;

        debug!("Reading transfer job {} in project {}", name, project);
        let job = match self.client.get_job(&name, &project).await {
            Ok(job) => job,
            Err(e) if e.is_not_found() => {
                info!("{}: {} not found, marking absent", TRANSFER_JOB_RESOURCE, name);
                return Ok(ReadOutcome::Absent);
            }
            Err(e) => return Err(e),
        };

        Ok(ReadOutcome::Found(flatten_job(&job, prior, &name, &project)?))
    }

    /// Compute the field mask and partial payload for `prior` → `planned`
    pub fn plan_update(
        &self,
        prior: &TransferJobResource,
        planned: &TransferJobResource,
    ) -> Result<UpdatePlan> {
        planned.validate()?;
        let project = self.project_for(prior)?;
        if let Some(requested) = planned.project.as_deref().filter(|p| !p.is_empty()) {
            if requested != project {
                return Err(Error::config(format!(
                    "project: cannot move transfer job from {} to {}, recreate it instead",
                    project, requested
                )));
            }
        }

        let mut changed = Vec::new();
        let mut job = TransferJob::default();

        if prior.description != planned.description {
            changed.push(FIELD_DESCRIPTION);
            job.description = planned.description.clone();
        }

        if prior.status != planned.status {
            if planned.status == TransferJobStatus::Deleted {
                return Err(Error::config(
                    "status: DELETED is only reachable by deleting the transfer job",
                ));
            }
            changed.push(FIELD_STATUS);
            job.status = Some(planned.status);
        }

        if prior.schedule != planned.schedule {
            changed.push(FIELD_SCHEDULE);
            job.schedule = Some(expand_required(planned.schedule.as_ref(), FIELD_SCHEDULE)?);
        }

        if prior.transfer_spec != planned.transfer_spec {
            changed.push(FIELD_TRANSFER_SPEC);
            job.transfer_spec = Some(assemble_spec(required_spec(planned)?)?);
        }

        Ok(UpdatePlan {
            request: UpdateTransferJobRequest {
                project_id: project,
                transfer_job: job,
                update_transfer_job_field_mask: changed.join(","),
            },
            changed,
        })
    }

    /// Apply `planned` over `prior` with a single patch
    ///
    /// Returns the planned record carrying the job identity. A plan with no
    /// changes sends nothing. On failure nothing is returned, so callers
    /// keep their prior state.
    pub async fn update(
        &self,
        prior: &TransferJobResource,
        planned: &TransferJobResource,
    ) -> Result<TransferJobResource> {
        let name = resource_name(prior)?;
        let plan = self.plan_update(prior, planned)?;

        let mut state = planned.clone();
        state.id = prior.id.clone();
        state.name = Some(name.clone());
        state.project = Some(plan.request.project_id.clone());
        state.creation_time = prior.creation_time.clone();
        state.last_modification_time = prior.last_modification_time.clone();
        state.deletion_time = prior.deletion_time.clone();

        if plan.is_empty() {
            debug!("Transfer job {} has no changes, skipping patch", name);
            return Ok(state);
        }

        debug!(
            "Patching transfer job {} with mask {:?}",
            name,
            plan.field_mask()
        );
        let patched = self.client.patch_job(&name, &plan.request).await?;

        let job_id = if patched.name.is_empty() {
            extract_job_id(&name)?
        } else {
            extract_job_id(&patched.name)?
        };
        info!(
            "{}: patched {} ({})",
            TRANSFER_JOB_RESOURCE,
            job_id,
            plan.field_mask()
        );

        state.id = Some(job_id);
        if patched.last_modification_time.is_some() {
            state.last_modification_time = patched.last_modification_time;
        }
        Ok(state)
    }

    /// Logically delete the job by patching its status to DELETED
    ///
    /// Every error is retried until the delete policy's window closes. An
    /// already-deleted job gets the same patch.
    pub async fn delete(&self, prior: &TransferJobResource) -> Result<()> {
        let name = resource_name(prior)?;
        let project = self.project_for(prior)?;

        let request = UpdateTransferJobRequest {
            project_id: project,
            transfer_job: TransferJob {
                status: Some(TransferJobStatus::Deleted),
                ..Default::default()
            },
            update_transfer_job_field_mask: FIELD_STATUS.to_string(),
        };

        debug!("Deleting transfer job {}", name);
        retry(&self.delete_policy, "delete transfer job", || {
            self.client.patch_job(&name, &request)
        })
        .await?;

        info!("{}: deleted {}", TRANSFER_JOB_RESOURCE, name);
        Ok(())
    }

    /// Adopt an existing job from a `{projectId}/{transferJobName}` id
    pub async fn import(&self, import_id: &str) -> Result<TransferJobResource> {
        let imported = parse_import_id(import_id)?;
        let state = TransferJobResource {
            id: Some(extract_job_id(&imported.name)?),
            name: Some(imported.name.clone()),
            project: Some(imported.project.clone()),
            ..Default::default()
        };

        match self.read(&state).await? {
            ReadOutcome::Found(resource) => {
                info!("{}: imported {}", TRANSFER_JOB_RESOURCE, imported.name);
                Ok(resource)
            }
            ReadOutcome::Absent => Err(Error::not_found(format!(
                "transfer job {} not found in project {}",
                imported.name, imported.project
            ))),
        }
    }
}

/// The job's `transferJobs/{id}` name: the stored name, else derived from the id
fn resource_name(resource: &TransferJobResource) -> Result<String> {
    match (resource.name.as_deref(), resource.id.as_deref()) {
        (Some(name), _) if !name.is_empty() => Ok(name.to_string()),
        (_, Some(id)) if !id.is_empty() => Ok(job_name(id)),
        _ => Err(Error::invalid_identifier(
            "transfer job has neither a name nor an id",
        )),
    }
}

fn required_spec(resource: &TransferJobResource) -> Result<&TransferSpecBlock> {
    resource
        .transfer_spec
        .as_ref()
        .ok_or_else(|| Error::config("transfer_spec: required block is not set"))
}

/// Full job body for a create request
fn build_job(resource: &TransferJobResource, project: &str) -> Result<TransferJob> {
    Ok(TransferJob {
        description: resource.description.clone(),
        project_id: project.to_string(),
        status: Some(resource.status),
        schedule: Some(expand_required(resource.schedule.as_ref(), FIELD_SCHEDULE)?),
        transfer_spec: Some(assemble_spec(required_spec(resource)?)?),
        ..Default::default()
    })
}

/// Remote job → record, overwriting every attribute
fn flatten_job(
    job: &TransferJob,
    prior: &TransferJobResource,
    name: &str,
    project: &str,
) -> Result<TransferJobResource> {
    let name = if job.name.is_empty() {
        name.to_string()
    } else {
        job.name.clone()
    };
    let project = if job.project_id.is_empty() {
        project.to_string()
    } else {
        job.project_id.clone()
    };

    let mut transfer_spec = job.transfer_spec.as_ref().map(disassemble_spec);
    if let Some(s3) = transfer_spec
        .as_mut()
        .and_then(|spec| spec.aws_s3_data_source.as_mut())
        && s3.aws_access_key.is_none()
    {
        s3.aws_access_key = prior_access_key(prior);
    }

    Ok(TransferJobResource {
        id: Some(extract_job_id(&name)?),
        name: Some(name),
        description: job.description.clone(),
        project: Some(project),
        status: job.status.unwrap_or_default(),
        schedule: flatten_block::<ScheduleBlock>(job.schedule.as_ref()),
        transfer_spec,
        creation_time: job.creation_time.clone(),
        last_modification_time: job.last_modification_time.clone(),
        deletion_time: job.deletion_time.clone(),
    })
}

fn prior_access_key(prior: &TransferJobResource) -> Option<AwsAccessKeyBlock> {
    prior
        .transfer_spec
        .as_ref()?
        .aws_s3_data_source
        .as_ref()?
        .aws_access_key
        .clone()
}

//! Identifier parsing and project resolution
//!
//! - Transfer job names: `transferJobs/{id}`
//! - Import ids: `{projectId}/{transferJobName}`
//! - Instance self links: `.../projects/{project}/instances/{instance}` or a bare instance name
//! - CA-certs ids: `projects/{project}/instance/{instance}`

use crate::{Error, Result};

const TRANSFER_JOBS_PREFIX: &str = "transferJobs/";

/// Extract the bare job id from a server-assigned `transferJobs/{id}` name
pub fn extract_job_id(name: &str) -> Result<String> {
    match name.strip_prefix(TRANSFER_JOBS_PREFIX) {
        Some(rest) if !rest.is_empty() => {
            let id = rest.split('/').next().unwrap_or(rest);
            Ok(id.to_string())
        }
        _ => Err(Error::invalid_identifier(format!(
            "Invalid transferJob id format {:?}, expecting transferJobs/{{id}}",
            name
        ))),
    }
}

/// Build the `transferJobs/{id}` name for a bare job id
pub fn job_name(job_id: &str) -> String {
    format!("{}{}", TRANSFER_JOBS_PREFIX, job_id)
}

/// A transfer job identified by an import id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedJob {
    pub project: String,
    /// `transferJobs/{transferJobName}`
    pub name: String,
}

/// Parse an import id of the form `{projectId}/{transferJobName}`
///
/// Exactly two segments are accepted.
pub fn parse_import_id(import_id: &str) -> Result<ImportedJob> {
    let parts: Vec<&str> = import_id.split('/').collect();
    match parts.as_slice() {
        [project, job] => Ok(ImportedJob {
            project: project.to_string(),
            name: job_name(job),
        }),
        _ => Err(Error::invalid_identifier(
            "Invalid transfer job specifier. Expecting {projectId}/{transferJobName}",
        )),
    }
}

/// Project and name of a project-scoped resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFieldValue {
    pub project: String,
    pub name: String,
}

/// Parse a project-scoped reference such as an instance self link
///
/// Accepts any value ending in `projects/{project}/{collection}/{name}`
/// (full self links included), or a bare `{name}` resolved against
/// `default_project`.
pub fn parse_project_field_value(
    collection: &str,
    value: &str,
    default_project: Option<&str>,
) -> Result<ProjectFieldValue> {
    let segments: Vec<&str> = value.trim_end_matches('/').split('/').collect();

    if segments.len() == 1 && !segments[0].is_empty() {
        let project = resolve_project(None, default_project)?;
        return Ok(ProjectFieldValue {
            project,
            name: segments[0].to_string(),
        });
    }

    if let [.., projects, project, coll, name] = segments.as_slice()
        && *projects == "projects"
        && *coll == collection
        && !project.is_empty()
        && !name.is_empty()
    {
        return Ok(ProjectFieldValue {
            project: project.to_string(),
            name: name.to_string(),
        });
    }

    Err(Error::invalid_identifier(format!(
        "Invalid {} specifier {:?}. Expecting projects/{{project}}/{}/{{name}} or {{name}}",
        collection, value, collection
    )))
}

/// Resolve the project: explicit value first, then the provider default
pub fn resolve_project(explicit: Option<&str>, default_project: Option<&str>) -> Result<String> {
    explicit
        .filter(|p| !p.is_empty())
        .or(default_project.filter(|p| !p.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| Error::config("project: required field is not set"))
}

/// Synthetic id of a CA-certs lookup
pub fn ca_certs_id(project: &str, instance: &str) -> String {
    format!("projects/{}/instance/{}", project, instance)
}

//! Storage Transfer v1 objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::is_false;
use crate::Error;

/// Status of a transfer job
///
/// `Deleted` is terminal: it is only ever reached through a logical delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferJobStatus {
    /// The job runs according to its schedule
    #[default]
    Enabled,
    /// The job is paused
    Disabled,
    /// The job is logically deleted
    Deleted,
}

impl TransferJobStatus {
    /// The wire/attribute spelling of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Disabled => "DISABLED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for TransferJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferJobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLED" => Ok(Self::Enabled),
            "DISABLED" => Ok(Self::Disabled),
            "DELETED" => Ok(Self::Deleted),
            other => Err(Error::config(format!(
                "expected status to be one of [ENABLED DISABLED DELETED], got {}",
                other
            ))),
        }
    }
}

/// A calendar date; no calendar validity cross-check is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: i32,
    #[serde(default)]
    pub day: i32,
}

/// A time of day in UTC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    #[serde(default)]
    pub hours: i32,
    #[serde(default)]
    pub minutes: i32,
    #[serde(default)]
    pub seconds: i32,
    #[serde(default)]
    pub nanos: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_end_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_of_day: Option<TimeOfDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsData {
    #[serde(default)]
    pub bucket_name: String,
}

/// AWS credentials for an S3 source
///
/// The Debug implementation intentionally does NOT expose either key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsAccessKey {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
}

impl fmt::Debug for AwsAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsAccessKey")
            .field("access_key_id", &"<REDACTED>")
            .field("secret_access_key", &"<REDACTED>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsS3Data {
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_access_key: Option<AwsAccessKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpData {
    #[serde(default)]
    pub list_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectConditions {
    /// Duration string such as `"3600s"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time_elapsed_since_last_modification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time_elapsed_since_last_modification: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_prefixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    #[serde(default, skip_serializing_if = "is_false")]
    pub overwrite_objects_already_existing_in_sink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_objects_unique_in_sink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_objects_from_source_after_transfer: bool,
}

/// What to transfer and where
///
/// The API models the data source as three optional fields; the assembler in
/// [`crate::spec`] guarantees at most one of them is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_data_sink: Option<GcsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_data_source: Option<GcsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_s3_data_source: Option<AwsS3Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_data_source: Option<HttpData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_conditions: Option<ObjectConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_options: Option<TransferOptions>,
}

/// A transfer job as stored by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferJob {
    /// Server-assigned, `transferJobs/{id}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_spec: Option<TransferSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modification_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<String>,
}

/// Body of a `transferJobs.patch` call
///
/// Only the fields listed in `update_transfer_job_field_mask` are applied
/// by the service; everything else in `transfer_job` is left at its zero
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransferJobRequest {
    pub project_id: String,
    pub transfer_job: TransferJob,
    pub update_transfer_job_field_mask: String,
}

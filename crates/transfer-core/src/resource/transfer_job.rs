//! Declarative records of the `google_storage_transfer_job` resource
//!
//! Field names are the resource's attribute names and form part of its
//! compatibility contract. Blocks declared with at most one item are
//! `Option<Block>` and use the [`singleton`](super::singleton) adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::singleton;
use crate::model::TransferJobStatus;

/// Resource type name used in logs
pub const TRANSFER_JOB_RESOURCE: &str = "google_storage_transfer_job";

/// Full state of a transfer job resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferJobResource {
    /// Bare job id, the local state key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Server-assigned `transferJobs/{id}` (computed)
    #[serde(default)]
    pub name: Option<String>,

    /// Required, at most 1024 characters
    #[serde(default)]
    pub description: String,

    /// Falls back to the provider's default project when unset
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub status: TransferJobStatus,

    /// Required
    #[serde(default, with = "singleton")]
    pub schedule: Option<ScheduleBlock>,

    /// Required
    #[serde(default, with = "singleton")]
    pub transfer_spec: Option<TransferSpecBlock>,

    #[serde(default)]
    pub creation_time: Option<String>,

    #[serde(default)]
    pub last_modification_time: Option<String>,

    #[serde(default)]
    pub deletion_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBlock {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayBlock {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub nanos: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    /// Required
    #[serde(default, with = "singleton")]
    pub schedule_start_date: Option<DateBlock>,

    #[serde(default, with = "singleton")]
    pub schedule_end_date: Option<DateBlock>,

    #[serde(default, with = "singleton")]
    pub start_time_of_day: Option<TimeOfDayBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpecBlock {
    #[serde(default, with = "singleton")]
    pub object_conditions: Option<ObjectConditionsBlock>,

    #[serde(default, with = "singleton")]
    pub transfer_options: Option<TransferOptionsBlock>,

    /// Required
    #[serde(default, with = "singleton")]
    pub gcs_data_sink: Option<GcsDataBlock>,

    /// Conflicts with `aws_s3_data_source` and `http_data_source`
    #[serde(default, with = "singleton")]
    pub gcs_data_source: Option<GcsDataBlock>,

    /// Conflicts with `gcs_data_source` and `http_data_source`
    #[serde(default, with = "singleton")]
    pub aws_s3_data_source: Option<AwsS3DataBlock>,

    /// Conflicts with `gcs_data_source` and `aws_s3_data_source`
    #[serde(default, with = "singleton")]
    pub http_data_source: Option<HttpDataBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsDataBlock {
    pub bucket_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsS3DataBlock {
    pub bucket_name: String,

    /// Required
    #[serde(default, with = "singleton")]
    pub aws_access_key: Option<AwsAccessKeyBlock>,
}

/// Both keys are sensitive and required together
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsAccessKeyBlock {
    pub access_key_id: String,
    pub secret_access_key: String,
}

// Custom Debug implementation that hides both keys
impl fmt::Debug for AwsAccessKeyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsAccessKeyBlock")
            .field("access_key_id", &"<REDACTED>")
            .field("secret_access_key", &"<REDACTED>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpDataBlock {
    pub list_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectConditionsBlock {
    #[serde(default)]
    pub min_time_elapsed_since_last_modification: Option<String>,

    #[serde(default)]
    pub max_time_elapsed_since_last_modification: Option<String>,

    /// At most 1000 entries
    #[serde(default)]
    pub include_prefixes: Vec<String>,

    /// At most 1000 entries
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,
}

/// `delete_objects_unique_in_sink` and
/// `delete_objects_from_source_after_transfer` conflict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptionsBlock {
    #[serde(default)]
    pub overwrite_objects_already_existing_in_sink: bool,

    #[serde(default)]
    pub delete_objects_unique_in_sink: bool,

    #[serde(default)]
    pub delete_objects_from_source_after_transfer: bool,
}

//! Declarative record of the `google_sql_ca_certs` data source

use serde::{Deserialize, Serialize};

/// Data source type name used in logs
pub const SQL_CA_CERTS_DATA_SOURCE: &str = "google_sql_ca_certs";

/// Inputs and outputs of a CA-certs lookup
///
/// Either `instance` or `instance_self_link` must be set; `instance` wins
/// when both are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlCaCertsDataSource {
    /// `projects/{project}/instance/{instance}` (computed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub instance: Option<String>,

    #[serde(default)]
    pub instance_self_link: Option<String>,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub active_version: Option<String>,

    #[serde(default)]
    pub certs: Vec<CaCertBlock>,
}

impl SqlCaCertsDataSource {
    /// Query by instance name (project from the provider default)
    pub fn for_instance(instance: impl Into<String>) -> Self {
        Self {
            instance: Some(instance.into()),
            ..Default::default()
        }
    }

    /// Query by instance self link
    pub fn for_self_link(self_link: impl Into<String>) -> Self {
        Self {
            instance_self_link: Some(self_link.into()),
            ..Default::default()
        }
    }

    /// Set the project explicitly
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaCertBlock {
    pub cert: String,
    pub common_name: String,
    pub create_time: String,
    pub expiration_time: String,
    pub sha1_fingerprint: String,
}

//! Cloud SQL CA-certs lookup
//!
//! Read-only: resolves the instance, lists its server CA certificates and
//! fills the computed attributes. No retry; a remote error propagates as is.

use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::identity::{ca_certs_id, parse_project_field_value, resolve_project};
use crate::resource::{CaCertBlock, SQL_CA_CERTS_DATA_SOURCE, SqlCaCertsDataSource};
use crate::traits::SqlAdminClient;

const INSTANCES_COLLECTION: &str = "instances";

/// Resolved target of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRef {
    pub project: String,
    pub instance: String,
}

/// Lookup of a Cloud SQL instance's server CA certificates
pub struct CaCertsLookup {
    client: Box<dyn SqlAdminClient>,
    default_project: Option<String>,
}

impl CaCertsLookup {
    pub fn new(client: Box<dyn SqlAdminClient>, config: &ProviderConfig) -> Self {
        Self {
            client,
            default_project: config.project.clone(),
        }
    }

    /// Pick the instance: `instance` first, then `instance_self_link`
    ///
    /// Fails before any remote call when neither is set.
    pub fn resolve(&self, query: &SqlCaCertsDataSource) -> Result<InstanceRef> {
        let default_project = query
            .project
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.default_project.as_deref());

        if let Some(instance) = query.instance.as_deref().filter(|i| !i.is_empty()) {
            return Ok(InstanceRef {
                project: resolve_project(query.project.as_deref(), self.default_project.as_deref())?,
                instance: instance.to_string(),
            });
        }

        if let Some(link) = query.instance_self_link.as_deref().filter(|l| !l.is_empty()) {
            let value = parse_project_field_value(INSTANCES_COLLECTION, link, default_project)?;
            return Ok(InstanceRef {
                project: value.project,
                instance: value.name,
            });
        }

        Err(Error::config(
            "one of instance or instance_self_link must be set",
        ))
    }

    /// Run the lookup, returning `query` with every computed attribute set
    pub async fn lookup(&self, query: &SqlCaCertsDataSource) -> Result<SqlCaCertsDataSource> {
        let target = self.resolve(query)?;

        debug!(
            "Listing server CAs of {}/{} via {}",
            target.project,
            target.instance,
            self.client.client_name()
        );
        let response = self
            .client
            .list_server_cas(&target.project, &target.instance)
            .await?;

        info!(
            "{}: found {} server CA cert(s) for instance {} (active version {:?})",
            SQL_CA_CERTS_DATA_SOURCE,
            response.certs.len(),
            target.instance,
            response.active_version
        );

        let mut result = query.clone();
        result.id = Some(ca_certs_id(&target.project, &target.instance));
        result.project = Some(target.project);
        result.instance = Some(target.instance);
        result.active_version = Some(response.active_version);
        result.certs = response.certs.iter().map(CaCertBlock::from).collect();
        Ok(result)
    }
}

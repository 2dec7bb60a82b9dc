//! Configuration types
//!
//! Provider-level settings shared by the job controller, the CA-certs lookup
//! and the REST clients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default Storage Transfer API root
pub const DEFAULT_STORAGE_TRANSFER_ENDPOINT: &str = "https://storagetransfer.googleapis.com/v1/";

/// Default Cloud SQL Admin API root
pub const DEFAULT_SQL_ADMIN_ENDPOINT: &str = "https://sqladmin.googleapis.com/sql/v1beta4/";

/// Main provider configuration
///
/// The Debug implementation intentionally does NOT expose the access token.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Project used when a resource does not name one
    #[serde(default)]
    pub project: Option<String>,

    /// OAuth2 bearer token
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Per-request HTTP timeout (in seconds)
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl ProviderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            project: None,
            access_token: String::new(),
            user_agent: default_user_agent(),
            endpoints: EndpointConfig::default(),
            http_timeout_secs: default_http_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }

    /// Set the default project
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.project.as_deref().is_some_and(str::is_empty) {
            return Err(crate::Error::config("project cannot be empty when set"));
        }
        if self.http_timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        self.endpoints.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    /// HTTP timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Custom Debug implementation that hides the access token
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("project", &self.project)
            .field("access_token", &"<REDACTED>")
            .field("user_agent", &self.user_agent)
            .field("endpoints", &self.endpoints)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// API root overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_storage_transfer_endpoint")]
    pub storage_transfer: String,

    #[serde(default = "default_sql_admin_endpoint")]
    pub sql_admin: String,
}

impl EndpointConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        for (name, url) in [
            ("storage_transfer", &self.storage_transfer),
            ("sql_admin", &self.sql_admin),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "{} endpoint must use HTTP or HTTPS scheme. Got: {}",
                    name, url
                )));
            }
            if !url.ends_with('/') {
                return Err(crate::Error::config(format!(
                    "{} endpoint must end with '/'. Got: {}",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            storage_transfer: default_storage_transfer_endpoint(),
            sql_admin: default_sql_admin_endpoint(),
        }
    }
}

/// Retry windows for the job lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Window for retrying transient errors on create (in seconds)
    #[serde(default = "default_create_timeout_secs")]
    pub create_timeout_secs: u64,

    /// Window for retrying the soft-delete patch (in seconds)
    #[serde(default = "default_delete_timeout_secs")]
    pub delete_timeout_secs: u64,

    /// First backoff delay (in milliseconds)
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Backoff cap (in milliseconds)
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        if self.initial_backoff_ms == 0 {
            return Err(crate::Error::config("initial backoff must be > 0"));
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(crate::Error::config(
                "max backoff must not be smaller than initial backoff",
            ));
        }
        Ok(())
    }

    fn backoff_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }

    /// Policy for create: transient errors only
    pub fn create_policy(&self) -> RetryPolicy {
        let (initial, max) = self.backoff_bounds();
        RetryPolicy::transient(Duration::from_secs(self.create_timeout_secs))
            .with_backoff(initial, max)
    }

    /// Policy for delete: every error
    pub fn delete_policy(&self) -> RetryPolicy {
        let (initial, max) = self.backoff_bounds();
        RetryPolicy::always(Duration::from_secs(self.delete_timeout_secs))
            .with_backoff(initial, max)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            create_timeout_secs: default_create_timeout_secs(),
            delete_timeout_secs: default_delete_timeout_secs(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

fn default_user_agent() -> String {
    format!("transferctl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_storage_transfer_endpoint() -> String {
    DEFAULT_STORAGE_TRANSFER_ENDPOINT.to_string()
}

fn default_sql_admin_endpoint() -> String {
    DEFAULT_SQL_ADMIN_ENDPOINT.to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_create_timeout_secs() -> u64 {
    60
}

fn default_delete_timeout_secs() -> u64 {
    60
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryOn;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();
        assert!(config.project.is_none());
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.retry.delete_timeout_secs, 60);
        assert_eq!(config.endpoints.storage_transfer, DEFAULT_STORAGE_TRANSFER_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policies_from_retry_config() {
        let retry = RetryConfig::default();

        let create = retry.create_policy();
        assert_eq!(create.retry_on, RetryOn::TransientErrors);
        assert_eq!(create.timeout, Duration::from_secs(60));

        let delete = retry.delete_policy();
        assert_eq!(delete.retry_on, RetryOn::AllErrors);
        assert_eq!(delete.initial_backoff, Duration::from_millis(500));
        assert_eq!(delete.max_backoff, Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ProviderConfig::new().with_project("");
        assert!(config.validate().is_err());

        config = ProviderConfig::new();
        config.endpoints.sql_admin = "ftp://example.com/".to_string();
        assert!(config.validate().is_err());

        config = ProviderConfig::new();
        config.retry.max_backoff_ms = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_access_token_not_exposed_in_debug() {
        let config = ProviderConfig::new().with_access_token("ya29.secret-token");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("ya29.secret-token"));
        assert!(debug_str.contains("ProviderConfig"));
    }
}

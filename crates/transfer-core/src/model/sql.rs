//! Cloud SQL Admin v1beta4 objects

use serde::{Deserialize, Serialize};

/// A server CA certificate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCert {
    #[serde(default)]
    pub cert: String,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub expiration_time: String,
    #[serde(default)]
    pub sha1_fingerprint: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
}

/// Response of `instances.listServerCas`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServerCasResponse {
    #[serde(default)]
    pub active_version: String,
    #[serde(default)]
    pub certs: Vec<SslCert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_list_server_cas() {
        let body = serde_json::json!({
            "kind": "sql#instancesListServerCas",
            "activeVersion": "v1",
            "certs": [{
                "kind": "sql#sslCert",
                "cert": "-----BEGIN CERTIFICATE-----",
                "commonName": "C=US,O=Google\\, Inc,CN=Google Cloud SQL Server CA",
                "createTime": "2019-01-01T00:00:00.000Z",
                "expirationTime": "2029-01-01T00:00:00.000Z",
                "sha1Fingerprint": "abc123",
                "instance": "db"
            }]
        });

        let response: ListServerCasResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.active_version, "v1");
        assert_eq!(response.certs.len(), 1);
        assert_eq!(response.certs[0].sha1_fingerprint, "abc123");
    }

    #[test]
    fn test_missing_certs_defaults_to_empty() {
        let response: ListServerCasResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.certs.is_empty());
        assert!(response.active_version.is_empty());
    }
}

use serde::Deserialize;

use crate::models::TenantCredential;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("cannot read credential file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("credential file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("credential document must be a JSON object keyed by tenant id")]
    NotAnObject,
}

/// Wire shape of one tenant's entry in the credential document.
#[derive(Debug, Default, Deserialize)]
struct CredentialEntry {
    #[serde(rename = "consumerKey", default)]
    consumer_key: Option<String>,
    #[serde(rename = "consumerSecret", default)]
    consumer_secret: Option<String>,
}

/// Parse the tenant credential document: a JSON object whose top-level keys
/// are tenant ids, each mapping to `{consumerKey, consumerSecret}`.
///
/// Document order is preserved. Entries with missing or malformed fields
/// load with empty strings; the orchestrator reports those tenants as
/// skipped rather than this loader aborting the run over one bad entry.
pub fn load_credentials(path: &str) -> Result<Vec<TenantCredential>, CredentialError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: path.to_string(),
        source,
    })?;

    let document: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| CredentialError::Parse {
            path: path.to_string(),
            source,
        })?;

    let entries = document.as_object().ok_or(CredentialError::NotAnObject)?;

    let credentials = entries
        .iter()
        .map(|(tenant_id, value)| {
            let entry: CredentialEntry =
                serde_json::from_value(value.clone()).unwrap_or_default();
            TenantCredential {
                tenant_id: tenant_id.clone(),
                client_id: entry.consumer_key.unwrap_or_default(),
                client_secret: entry.consumer_secret.unwrap_or_default(),
            }
        })
        .collect();

    Ok(credentials)
}

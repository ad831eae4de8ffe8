use serde::Deserialize;

/// Raw JSON returned by the token endpoint on a successful grant.
/// Only `access_token` is consumed; expiry is not tracked by this tool.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

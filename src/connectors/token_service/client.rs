use async_trait::async_trait;
use tracing::Instrument;

use super::connector::TokenIssuer;
use super::types::TokenResponse;
use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, TenantCredential};

/// Scopes requested with every grant: catalog read, definition read/write,
/// import/export, create and publish.
pub const TOKEN_SCOPES: &str = "apim:api_view apim:api_manage apim:api_import_export \
                                apim:api_list_view apim:api_create apim:api_publish";

/// HTTP client for the resident key manager's token endpoint.
pub struct TokenServiceClient {
    token_url: String,
    http: reqwest::Client,
}

impl TokenServiceClient {
    pub fn new(token_url: &str, http: reqwest::Client) -> Self {
        Self {
            token_url: token_url.trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl TokenIssuer for TokenServiceClient {
    async fn issue_token(
        &self,
        credential: &TenantCredential,
    ) -> Result<AccessToken, ConnectorError> {
        let span = tracing::info_span!("issue_token", tenant = %credential.tenant_id);

        let params = [("grant_type", "client_credentials"), ("scope", TOKEN_SCOPES)];
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&params)
            .send()
            .instrument(span)
            .await?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ConnectorError::Http(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ConnectorError::Unauthorized(body));
        }
        if status != reqwest::StatusCode::OK {
            return Err(ConnectorError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|_| ConnectorError::InvalidResponse(body))?;
        Ok(AccessToken::new(token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = TokenServiceClient::new("https://km.local/oauth2/token/", reqwest::Client::new());
        assert_eq!(client.token_url, "https://km.local/oauth2/token");
    }

    #[test]
    fn scope_set_covers_publish_and_import_export() {
        assert!(TOKEN_SCOPES.contains("apim:api_publish"));
        assert!(TOKEN_SCOPES.contains("apim:api_import_export"));
        assert!(TOKEN_SCOPES.contains("apim:api_list_view"));
    }
}

use async_trait::async_trait;
use tracing::Instrument;

use super::connector::PublisherConnector;
use super::types::{DeployedRevision, DeploymentRequestEntry, ListEnvelope, ListParams};
use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, ApiDefinition, ApiSummary, DeploymentBinding, NewRevision};

/// HTTP client for the publisher REST API.
pub struct PublisherClient {
    base_url: String,
    http: reqwest::Client,
}

impl PublisherClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Read the body and enforce the expected status, mapping everything
    /// else to a `ConnectorError`.
    async fn read_body(
        resp: reqwest::Response,
        expected: reqwest::StatusCode,
    ) -> Result<String, ConnectorError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ConnectorError::Http(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ConnectorError::Unauthorized(body));
        }
        if status != expected {
            return Err(ConnectorError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl PublisherConnector for PublisherClient {
    async fn list_apis(
        &self,
        token: &AccessToken,
        params: &ListParams,
    ) -> Result<Vec<ApiSummary>, ConnectorError> {
        let span = tracing::info_span!("publisher_list_apis");

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("limit", params.limit.as_str()),
                ("offset", params.offset.as_str()),
                ("sortBy", params.sort_by.as_str()),
                ("sortOrder", params.sort_order.as_str()),
            ])
            .bearer_auth(&token.bearer)
            .send()
            .instrument(span)
            .await?;

        let body = Self::read_body(resp, reqwest::StatusCode::OK).await?;
        let envelope: ListEnvelope<ApiSummary> =
            serde_json::from_str(&body).map_err(|_| ConnectorError::InvalidResponse(body))?;
        Ok(envelope.list)
    }

    async fn get_api(
        &self,
        token: &AccessToken,
        api_id: &str,
    ) -> Result<ApiDefinition, ConnectorError> {
        let span = tracing::info_span!("publisher_get_api", api_id = %api_id);

        let url = format!("{}/{}", self.base_url, api_id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token.bearer)
            .send()
            .instrument(span)
            .await?;

        let body = Self::read_body(resp, reqwest::StatusCode::OK).await?;
        serde_json::from_str(&body).map_err(|_| ConnectorError::InvalidResponse(body))
    }

    async fn update_api(
        &self,
        token: &AccessToken,
        api_id: &str,
        definition: &ApiDefinition,
    ) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("publisher_update_api", api_id = %api_id);

        let url = format!("{}/{}", self.base_url, api_id);
        let resp = self
            .http
            .put(&url)
            .bearer_auth(&token.bearer)
            .json(definition)
            .send()
            .instrument(span)
            .await?;

        Self::read_body(resp, reqwest::StatusCode::OK).await?;
        Ok(())
    }

    async fn list_deployed_revisions(
        &self,
        token: &AccessToken,
        api_id: &str,
    ) -> Result<Vec<DeployedRevision>, ConnectorError> {
        let span = tracing::info_span!("publisher_list_deployed_revisions", api_id = %api_id);

        let url = format!("{}/{}/revisions", self.base_url, api_id);
        let resp = self
            .http
            .get(&url)
            .query(&[("query", "deployed:true")])
            .bearer_auth(&token.bearer)
            .send()
            .instrument(span)
            .await?;

        let body = Self::read_body(resp, reqwest::StatusCode::OK).await?;
        let envelope: ListEnvelope<DeployedRevision> =
            serde_json::from_str(&body).map_err(|_| ConnectorError::InvalidResponse(body))?;
        Ok(envelope.list)
    }

    async fn create_revision(
        &self,
        token: &AccessToken,
        api_id: &str,
        description: &str,
    ) -> Result<NewRevision, ConnectorError> {
        let span = tracing::info_span!("publisher_create_revision", api_id = %api_id);

        let url = format!("{}/{}/revisions", self.base_url, api_id);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&token.bearer)
            .json(&serde_json::json!({ "description": description }))
            .send()
            .instrument(span)
            .await?;

        let body = Self::read_body(resp, reqwest::StatusCode::CREATED).await?;
        serde_json::from_str(&body).map_err(|_| ConnectorError::InvalidResponse(body))
    }

    async fn deploy_revision(
        &self,
        token: &AccessToken,
        api_id: &str,
        revision_id: &str,
        bindings: &[DeploymentBinding],
    ) -> Result<(), ConnectorError> {
        let span = tracing::info_span!(
            "publisher_deploy_revision",
            api_id = %api_id,
            revision_id = %revision_id
        );

        let payload: Vec<DeploymentRequestEntry> = bindings
            .iter()
            .map(|binding| DeploymentRequestEntry {
                revision_uuid: revision_id,
                name: &binding.name,
                vhost: &binding.vhost,
                display_on_devportal: binding.display_on_devportal,
            })
            .collect();

        let url = format!("{}/{}/deploy-revision", self.base_url, api_id);
        let resp = self
            .http
            .post(&url)
            .query(&[("revisionId", revision_id)])
            .bearer_auth(&token.bearer)
            .json(&payload)
            .send()
            .instrument(span)
            .await?;

        Self::read_body(resp, reqwest::StatusCode::CREATED).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = PublisherClient::new(
            "https://apim.local/api/am/publisher/v4/apis/",
            reqwest::Client::new(),
        );
        assert_eq!(client.base_url, "https://apim.local/api/am/publisher/v4/apis");
    }
}

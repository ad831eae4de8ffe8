use async_trait::async_trait;

use super::types::{DeployedRevision, ListParams};
use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, ApiDefinition, ApiSummary, DeploymentBinding, NewRevision};

/// Trait for the publisher REST API.
/// Allows mocking in tests and swapping implementations.
#[async_trait]
pub trait PublisherConnector: Send + Sync {
    /// List the tenant's APIs in the order the publisher returns them.
    async fn list_apis(
        &self,
        token: &AccessToken,
        params: &ListParams,
    ) -> Result<Vec<ApiSummary>, ConnectorError>;

    /// Fetch the full definition document for one API.
    async fn get_api(
        &self,
        token: &AccessToken,
        api_id: &str,
    ) -> Result<ApiDefinition, ConnectorError>;

    /// Re-submit a definition document to refresh the API. Success iff the
    /// publisher answers 200.
    async fn update_api(
        &self,
        token: &AccessToken,
        api_id: &str,
        definition: &ApiDefinition,
    ) -> Result<(), ConnectorError>;

    /// List the API's currently-deployed revisions with their gateway
    /// deployment entries.
    async fn list_deployed_revisions(
        &self,
        token: &AccessToken,
        api_id: &str,
    ) -> Result<Vec<DeployedRevision>, ConnectorError>;

    /// Request a new, undeployed revision slot.
    async fn create_revision(
        &self,
        token: &AccessToken,
        api_id: &str,
        description: &str,
    ) -> Result<NewRevision, ConnectorError>;

    /// Submit one slice of bindings onto `revision_id`. Called once per
    /// prior-revision key of the binding set.
    async fn deploy_revision(
        &self,
        token: &AccessToken,
        api_id: &str,
        revision_id: &str,
        bindings: &[DeploymentBinding],
    ) -> Result<(), ConnectorError>;
}

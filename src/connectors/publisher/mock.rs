use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::connector::PublisherConnector;
use super::types::{DeployedRevision, ListParams};
use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, ApiDefinition, ApiSummary, DeploymentBinding, NewRevision};

/// Everything the mock publisher was asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ListApis {
        bearer: String,
    },
    GetApi {
        api_id: String,
    },
    UpdateApi {
        api_id: String,
    },
    ListDeployedRevisions {
        api_id: String,
    },
    CreateRevision {
        api_id: String,
        description: String,
    },
    DeployRevision {
        api_id: String,
        revision_id: String,
        bindings: Vec<DeploymentBinding>,
    },
}

/// Scriptable publisher for orchestrator tests. Responses are keyed by
/// bearer token (catalogs) and API id (everything else); unscripted lookups
/// fail the way a broken platform would. Records every call in order.
#[derive(Default)]
pub struct MockPublisher {
    catalogs: HashMap<String, Vec<ApiSummary>>,
    definitions: HashMap<String, ApiDefinition>,
    failing_updates: HashSet<String>,
    deployed: HashMap<String, Vec<DeployedRevision>>,
    revision_ids: HashMap<String, String>,
    failing_deploy_calls: HashSet<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog returned for a given bearer token.
    pub fn with_catalog(mut self, bearer: &str, apis: Vec<ApiSummary>) -> Self {
        self.catalogs.insert(bearer.to_string(), apis);
        self
    }

    pub fn with_definition(mut self, api_id: &str, definition: ApiDefinition) -> Self {
        self.definitions.insert(api_id.to_string(), definition);
        self
    }

    pub fn with_failing_update(mut self, api_id: &str) -> Self {
        self.failing_updates.insert(api_id.to_string());
        self
    }

    pub fn with_deployed_revisions(mut self, api_id: &str, revisions: Vec<DeployedRevision>) -> Self {
        self.deployed.insert(api_id.to_string(), revisions);
        self
    }

    /// Id handed out when a new revision is created for `api_id`.
    pub fn with_new_revision(mut self, api_id: &str, revision_id: &str) -> Self {
        self.revision_ids
            .insert(api_id.to_string(), revision_id.to_string());
        self
    }

    /// Make the n-th deploy submission (0-based, counted across the whole
    /// run) fail.
    pub fn with_failing_deploy_call(mut self, index: usize) -> Self {
        self.failing_deploy_calls.insert(index);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the deploy submissions, in order.
    pub fn deploy_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, RecordedCall::DeployRevision { .. }))
            .collect()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PublisherConnector for MockPublisher {
    async fn list_apis(
        &self,
        token: &AccessToken,
        _params: &ListParams,
    ) -> Result<Vec<ApiSummary>, ConnectorError> {
        self.record(RecordedCall::ListApis {
            bearer: token.bearer.clone(),
        });
        match self.catalogs.get(&token.bearer) {
            Some(apis) => Ok(apis.clone()),
            None => Err(ConnectorError::UnexpectedStatus {
                status: 500,
                body: "no catalog scripted for this token".to_string(),
            }),
        }
    }

    async fn get_api(
        &self,
        _token: &AccessToken,
        api_id: &str,
    ) -> Result<ApiDefinition, ConnectorError> {
        self.record(RecordedCall::GetApi {
            api_id: api_id.to_string(),
        });
        match self.definitions.get(api_id) {
            Some(definition) => Ok(definition.clone()),
            None => Err(ConnectorError::UnexpectedStatus {
                status: 404,
                body: format!("API {} not found", api_id),
            }),
        }
    }

    async fn update_api(
        &self,
        _token: &AccessToken,
        api_id: &str,
        _definition: &ApiDefinition,
    ) -> Result<(), ConnectorError> {
        self.record(RecordedCall::UpdateApi {
            api_id: api_id.to_string(),
        });
        if self.failing_updates.contains(api_id) {
            return Err(ConnectorError::UnexpectedStatus {
                status: 500,
                body: "update rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn list_deployed_revisions(
        &self,
        _token: &AccessToken,
        api_id: &str,
    ) -> Result<Vec<DeployedRevision>, ConnectorError> {
        self.record(RecordedCall::ListDeployedRevisions {
            api_id: api_id.to_string(),
        });
        Ok(self.deployed.get(api_id).cloned().unwrap_or_default())
    }

    async fn create_revision(
        &self,
        _token: &AccessToken,
        api_id: &str,
        description: &str,
    ) -> Result<NewRevision, ConnectorError> {
        self.record(RecordedCall::CreateRevision {
            api_id: api_id.to_string(),
            description: description.to_string(),
        });
        match self.revision_ids.get(api_id) {
            Some(id) => Ok(NewRevision { id: id.clone() }),
            None => Err(ConnectorError::UnexpectedStatus {
                status: 500,
                body: "revision creation rejected".to_string(),
            }),
        }
    }

    async fn deploy_revision(
        &self,
        _token: &AccessToken,
        api_id: &str,
        revision_id: &str,
        bindings: &[DeploymentBinding],
    ) -> Result<(), ConnectorError> {
        let index = self
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, RecordedCall::DeployRevision { .. }))
            .count();
        self.record(RecordedCall::DeployRevision {
            api_id: api_id.to_string(),
            revision_id: revision_id.to_string(),
            bindings: bindings.to_vec(),
        });
        if self.failing_deploy_calls.contains(&index) {
            return Err(ConnectorError::UnexpectedStatus {
                status: 500,
                body: "gateway rejected the deployment".to_string(),
            });
        }
        Ok(())
    }
}

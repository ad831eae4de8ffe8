use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::connector::TokenIssuer;
use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, TenantCredential};

/// Scriptable token issuer for tests. Tenants registered with `with_token`
/// authenticate; everyone else gets `Unauthorized`. Records the tenant id of
/// every call in order.
#[derive(Default)]
pub struct MockTokenIssuer {
    tokens: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockTokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, tenant_id: &str, bearer: &str) -> Self {
        self.tokens.insert(tenant_id.to_string(), bearer.to_string());
        self
    }

    /// Tenant ids of every `issue_token` call, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn issue_token(
        &self,
        credential: &TenantCredential,
    ) -> Result<AccessToken, ConnectorError> {
        self.calls
            .lock()
            .unwrap()
            .push(credential.tenant_id.clone());

        match self.tokens.get(&credential.tenant_id) {
            Some(bearer) => Ok(AccessToken::new(bearer.clone())),
            None => Err(ConnectorError::Unauthorized(
                r#"{"error":"invalid_client"}"#.to_string(),
            )),
        }
    }
}

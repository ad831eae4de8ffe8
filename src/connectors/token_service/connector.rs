use async_trait::async_trait;

use crate::connectors::errors::ConnectorError;
use crate::models::{AccessToken, TenantCredential};

/// Trait for the key manager's token endpoint.
/// Allows mocking in tests and swapping implementations.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Exchange a tenant's consumer key/secret for a bearer token via the
    /// client-credentials grant. Any failure (transport, non-200 status,
    /// unparseable body) comes back as a `ConnectorError`; the caller treats
    /// all of them as "skip this tenant".
    async fn issue_token(
        &self,
        credential: &TenantCredential,
    ) -> Result<AccessToken, ConnectorError>;
}

use tracing::Instrument;

use crate::configuration::Settings;
use crate::connectors::publisher::types::ListParams;
use crate::connectors::publisher::PublisherConnector;
use crate::connectors::token_service::TokenIssuer;
use crate::models::{
    AccessToken, ApiSummary, NewRevision, RevisionBindingSet, TenantCredential,
};
use crate::services::bindings::extract_bindings;

/// Why one API's redeployment stopped before completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    DetailsUnavailable,
    UpdateFailed,
    NoDeployedRevisions,
    MalformedDeployment(String),
    RevisionCreationFailed,
}

/// Outcome of running one API through the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Redeployed {
        submissions: usize,
        failed_submissions: usize,
    },
    Skipped(SkipReason),
}

/// Outcome of one tenant's pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantOutcome {
    /// Credential entry had an empty consumer key or secret.
    MissingCredentials,
    /// Token grant failed; no publisher call was made.
    AuthenticationFailed,
    /// Catalog listing failed or came back empty.
    CatalogEmptyOrUnavailable,
    Processed {
        apis: usize,
        redeployed: usize,
        skipped: usize,
        failed_submissions: usize,
    },
}

/// Aggregate counters; the only state that outlives an iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tenants: usize,
    pub tenants_processed: usize,
    pub tenants_skipped: usize,
    pub apis_redeployed: usize,
    pub apis_skipped: usize,
    pub failed_submissions: usize,
}

/// Drives the redeployment workflow: tenants in credential-document order,
/// APIs in catalog order, strictly sequential. Failures are converted into
/// skips at the step where they happen; the run itself never aborts past
/// startup.
pub struct Redeployer<'a> {
    settings: &'a Settings,
    token_issuer: &'a dyn TokenIssuer,
    publisher: &'a dyn PublisherConnector,
}

impl<'a> Redeployer<'a> {
    pub fn new(
        settings: &'a Settings,
        token_issuer: &'a dyn TokenIssuer,
        publisher: &'a dyn PublisherConnector,
    ) -> Self {
        Self {
            settings,
            token_issuer,
            publisher,
        }
    }

    fn list_params(&self) -> ListParams {
        ListParams {
            limit: self.settings.api_list.limit.clone(),
            offset: self.settings.api_list.offset.clone(),
            sort_by: self.settings.api_list.sort_by.clone(),
            sort_order: self.settings.api_list.order_by.clone(),
        }
    }

    /// Process every tenant once. Returns the aggregate counters.
    pub async fn run(&self, credentials: &[TenantCredential]) -> RunSummary {
        let mut summary = RunSummary::default();
        summary.tenants = credentials.len();

        tracing::info!(tenants = credentials.len(), "Starting tenant redeployment pass");

        for credential in credentials {
            let span = tracing::info_span!("tenant", tenant = %credential.tenant_id);
            let outcome = self.process_tenant(credential).instrument(span).await;

            match outcome {
                TenantOutcome::Processed {
                    apis,
                    redeployed,
                    skipped,
                    failed_submissions,
                } => {
                    summary.tenants_processed += 1;
                    summary.apis_redeployed += redeployed;
                    summary.apis_skipped += skipped;
                    summary.failed_submissions += failed_submissions;
                    tracing::info!(
                        tenant = %credential.tenant_id,
                        apis,
                        redeployed,
                        skipped,
                        "Completed redeployment for tenant"
                    );
                }
                ref skipped => {
                    summary.tenants_skipped += 1;
                    tracing::warn!(
                        tenant = %credential.tenant_id,
                        outcome = ?skipped,
                        "Skipped tenant"
                    );
                }
            }
        }

        tracing::info!(
            tenants_processed = summary.tenants_processed,
            tenants_skipped = summary.tenants_skipped,
            apis_redeployed = summary.apis_redeployed,
            apis_skipped = summary.apis_skipped,
            failed_submissions = summary.failed_submissions,
            "Tenant redeployment pass finished"
        );

        summary
    }

    /// Authenticate, list the catalog, then walk the tenant's APIs in the
    /// order the publisher returned them.
    pub async fn process_tenant(&self, credential: &TenantCredential) -> TenantOutcome {
        if !credential.is_complete() {
            tracing::error!(
                tenant = %credential.tenant_id,
                "Credential entry is missing its consumer key or secret"
            );
            return TenantOutcome::MissingCredentials;
        }

        tracing::info!(
            tenant = %credential.tenant_id,
            client_id = %credential.client_id,
            "Requesting access token"
        );
        let token = match self.token_issuer.issue_token(credential).await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(
                    tenant = %credential.tenant_id,
                    error = %e,
                    "Failed to obtain access token"
                );
                return TenantOutcome::AuthenticationFailed;
            }
        };

        let apis = match self.publisher.list_apis(&token, &self.list_params()).await {
            Ok(apis) => apis,
            Err(e) => {
                tracing::error!(
                    tenant = %credential.tenant_id,
                    error = %e,
                    "Failed to list APIs"
                );
                return TenantOutcome::CatalogEmptyOrUnavailable;
            }
        };
        if apis.is_empty() {
            tracing::error!(tenant = %credential.tenant_id, "No APIs found for tenant");
            return TenantOutcome::CatalogEmptyOrUnavailable;
        }

        tracing::info!(
            tenant = %credential.tenant_id,
            apis = apis.len(),
            "Updating and creating new revisions"
        );

        let mut redeployed = 0;
        let mut skipped = 0;
        let mut failed_total = 0;
        for api in &apis {
            let span = tracing::info_span!("api", api_id = %api.id, api_name = %api.name);
            match self.process_api(&token, api).instrument(span).await {
                ApiOutcome::Redeployed {
                    submissions,
                    failed_submissions,
                } => {
                    redeployed += 1;
                    failed_total += failed_submissions;
                    tracing::info!(
                        api_id = %api.id,
                        submissions,
                        failed_submissions,
                        "Finished redeploying API"
                    );
                }
                ApiOutcome::Skipped(reason) => {
                    skipped += 1;
                    tracing::warn!(api_id = %api.id, reason = ?reason, "Skipped API");
                }
            }
        }

        TenantOutcome::Processed {
            apis: apis.len(),
            redeployed,
            skipped,
            failed_submissions: failed_total,
        }
    }

    /// The seven-step workflow for one API. Each step's failure turns into
    /// a tagged skip; nothing here panics or propagates a transport error.
    async fn process_api(&self, token: &AccessToken, api: &ApiSummary) -> ApiOutcome {
        tracing::info!(api_name = %api.name, "Retrieving API definition");
        let definition = match self.publisher.get_api(token, &api.id).await {
            Ok(definition) => definition,
            Err(e) => {
                tracing::error!(error = %e, "Failed to retrieve API definition");
                return ApiOutcome::Skipped(SkipReason::DetailsUnavailable);
            }
        };

        tracing::info!(api_name = %api.name, "Updating API");
        if let Err(e) = self.publisher.update_api(token, &api.id, &definition).await {
            tracing::error!(error = %e, "Failed to update API");
            return ApiOutcome::Skipped(SkipReason::UpdateFailed);
        }

        let revisions = match self.publisher.list_deployed_revisions(token, &api.id).await {
            Ok(revisions) => revisions,
            Err(e) => {
                tracing::warn!(error = %e, "Could not list deployed revisions");
                return ApiOutcome::Skipped(SkipReason::NoDeployedRevisions);
            }
        };
        if revisions.is_empty() {
            tracing::warn!(api_name = %api.name, "No deployed revisions found");
            return ApiOutcome::Skipped(SkipReason::NoDeployedRevisions);
        }

        let binding_set = match extract_bindings(&revisions) {
            Ok(set) => set,
            Err(e) => {
                tracing::error!(error = %e, "Deployment entries are malformed");
                return ApiOutcome::Skipped(SkipReason::MalformedDeployment(e.to_string()));
            }
        };

        tracing::info!(api_name = %api.name, "Creating new revision");
        let new_revision = match self
            .publisher
            .create_revision(token, &api.id, &self.settings.revision_description)
            .await
        {
            Ok(revision) => revision,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create new revision");
                return ApiOutcome::Skipped(SkipReason::RevisionCreationFailed);
            }
        };
        tracing::info!(revision_id = %new_revision.id, "Created new revision");

        let (submissions, failed_submissions) = self
            .deploy_bindings(token, &api.id, &binding_set, &new_revision)
            .await;

        ApiOutcome::Redeployed {
            submissions,
            failed_submissions,
        }
    }

    /// One deploy submission per prior-revision key, each stamped with the
    /// same new revision id. A failed submission is logged and the loop
    /// moves on; there is no rollback of the created revision.
    async fn deploy_bindings(
        &self,
        token: &AccessToken,
        api_id: &str,
        binding_set: &RevisionBindingSet,
        new_revision: &NewRevision,
    ) -> (usize, usize) {
        let mut failed = 0;

        for (prior_revision_id, bindings) in binding_set {
            match self
                .publisher
                .deploy_revision(token, api_id, &new_revision.id, bindings)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        revision_id = %new_revision.id,
                        prior_revision_id = %prior_revision_id,
                        bindings = bindings.len(),
                        "New revision deployed"
                    );
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        revision_id = %new_revision.id,
                        prior_revision_id = %prior_revision_id,
                        error = %e,
                        "Failed to deploy new revision"
                    );
                }
            }
        }

        (binding_set.len(), failed)
    }
}

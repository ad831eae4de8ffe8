use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One gateway-exposure slot of a deployed revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentBinding {
    pub name: String,
    pub vhost: String,
    #[serde(rename = "displayOnDevportal")]
    pub display_on_devportal: bool,
}

/// Prior revision id → that revision's bindings, in source order.
///
/// Every deployed revision contributes a key, duplicates across revisions
/// included; each key's binding list is replayed independently onto the same
/// new revision.
pub type RevisionBindingSet = IndexMap<String, Vec<DeploymentBinding>>;

/// Identifier of a freshly created, still undeployed revision slot.
/// Consumed by the deploy step and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewRevision {
    pub id: String,
}

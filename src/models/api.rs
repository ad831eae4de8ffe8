use serde::{Deserialize, Serialize};

/// One entry of the publisher's API catalog; enough to drive the per-API
/// loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub id: String,
    pub name: String,
}

/// Full API definition document as returned by the publisher.
///
/// Kept opaque (field order preserved) so everything this workflow does not
/// touch round-trips unchanged through the update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiDefinition(pub serde_json::Value);

use serde::{Deserialize, Serialize};

/// Catalog listing parameters, forwarded verbatim as query parameters.
/// Interpretation (and defaulting) belongs to the publisher, not this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: String,
    pub offset: String,
    pub sort_by: String,
    pub sort_order: String,
}

/// `{"list": [...], "count": n}` envelope the publisher wraps collection
/// responses in. A reply without `list` reads as an empty collection.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    pub count: Option<u64>,
}

/// One currently-deployed revision with its raw gateway deployment entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeployedRevision {
    pub id: String,
    #[serde(rename = "deploymentInfo", default)]
    pub deployment_info: Vec<DeploymentEntry>,
}

/// One gateway deployment entry inside a revision, as the publisher reports
/// it. `display_on_devportal` stays optional here so a missing flag can be
/// surfaced by the binding extractor instead of failing the listing parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentEntry {
    pub name: String,
    pub vhost: String,
    #[serde(rename = "displayOnDevportal")]
    pub display_on_devportal: Option<bool>,
}

/// One element of the deploy-revision request body. Every entry is stamped
/// with the newly created revision's id, whatever revision the binding was
/// extracted from.
#[derive(Debug, Serialize)]
pub struct DeploymentRequestEntry<'a> {
    #[serde(rename = "revisionUuid")]
    pub revision_uuid: &'a str,
    pub name: &'a str,
    pub vhost: &'a str,
    #[serde(rename = "displayOnDevportal")]
    pub display_on_devportal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiSummary;

    #[test]
    fn envelope_defaults_to_empty_list() {
        let envelope: ListEnvelope<ApiSummary> = serde_json::from_str(r#"{"count":0}"#).unwrap();
        assert!(envelope.list.is_empty());
    }

    #[test]
    fn deployed_revision_parses_entries_in_order() {
        let revision: DeployedRevision = serde_json::from_str(
            r#"{
                "id": "rev1",
                "deploymentInfo": [
                    {"name": "Production", "vhost": "api.acme.com", "displayOnDevportal": true},
                    {"name": "Sandbox", "vhost": "sandbox.acme.com", "displayOnDevportal": false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(revision.id, "rev1");
        assert_eq!(revision.deployment_info[0].name, "Production");
        assert_eq!(revision.deployment_info[1].vhost, "sandbox.acme.com");
    }

    #[test]
    fn missing_devportal_flag_parses_as_none() {
        let entry: DeploymentEntry =
            serde_json::from_str(r#"{"name":"Production","vhost":"api.acme.com"}"#).unwrap();
        assert_eq!(entry.display_on_devportal, None);
    }

    #[test]
    fn request_entry_serializes_wire_names() {
        let entry = DeploymentRequestEntry {
            revision_uuid: "rev2",
            name: "Production",
            vhost: "api.acme.com",
            display_on_devportal: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["revisionUuid"], "rev2");
        assert_eq!(json["displayOnDevportal"], true);
    }
}

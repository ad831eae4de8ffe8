//! HTTP-level tests of the publisher client against a wiremock server:
//! URL shapes, auth headers, status handling, body round-trips.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apim_redeployer::connectors::errors::ConnectorError;
use apim_redeployer::connectors::publisher::types::ListParams;
use apim_redeployer::connectors::publisher::{PublisherClient, PublisherConnector};
use apim_redeployer::models::{AccessToken, ApiDefinition, DeploymentBinding};

fn token() -> AccessToken {
    AccessToken::new("T1")
}

fn client(server: &MockServer) -> PublisherClient {
    PublisherClient::new(&format!("{}/apis", server.uri()), reqwest::Client::new())
}

fn list_params() -> ListParams {
    ListParams {
        limit: "25".to_string(),
        offset: "0".to_string(),
        sort_by: "createdTime".to_string(),
        sort_order: "desc".to_string(),
    }
}

#[tokio::test]
async fn list_apis_forwards_listing_parameters_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .and(query_param("sortBy", "createdTime"))
        .and(query_param("sortOrder", "desc"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "list": [
                {"id": "a1", "name": "Orders", "lifeCycleStatus": "PUBLISHED"},
                {"id": "a2", "name": "Payments", "lifeCycleStatus": "PUBLISHED"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let apis = client(&server).list_apis(&token(), &list_params()).await.unwrap();
    assert_eq!(apis.len(), 2);
    assert_eq!(apis[0].id, "a1");
    assert_eq!(apis[1].name, "Payments");
}

#[tokio::test]
async fn list_apis_without_list_field_reads_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;

    let apis = client(&server).list_apis(&token(), &list_params()).await.unwrap();
    assert!(apis.is_empty());
}

#[tokio::test]
async fn list_apis_on_server_error_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_apis(&token(), &list_params())
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::UnexpectedStatus { status: 500, .. }));
}

#[tokio::test]
async fn get_api_returns_the_document_untouched() {
    let server = MockServer::start().await;
    let document = json!({
        "id": "a1",
        "name": "Orders",
        "context": "/orders",
        "operations": [{"target": "/list", "verb": "GET"}]
    });

    Mock::given(method("GET"))
        .and(path("/apis/a1"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .mount(&server)
        .await;

    let definition = client(&server).get_api(&token(), "a1").await.unwrap();
    assert_eq!(definition.0, document);
}

#[tokio::test]
async fn update_api_puts_the_round_tripped_document() {
    let server = MockServer::start().await;
    let document = json!({"id": "a1", "name": "Orders", "context": "/orders"});

    Mock::given(method("PUT"))
        .and(path("/apis/a1"))
        .and(header("Authorization", "Bearer T1"))
        .and(body_json(document.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(document.clone()))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_api(&token(), "a1", &ApiDefinition(document))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_api_treats_conflict_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/apis/a1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("working copy locked"))
        .mount(&server)
        .await;

    let err = client(&server)
        .update_api(&token(), "a1", &ApiDefinition(json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::UnexpectedStatus { status: 409, .. }));
}

#[tokio::test]
async fn deployed_revisions_are_filtered_and_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis/a1/revisions"))
        .and(query_param("query", "deployed:true"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "list": [{
                "id": "rev1",
                "description": "initial",
                "deploymentInfo": [
                    {"name": "Production", "vhost": "api.acme.com", "displayOnDevportal": true}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let revisions = client(&server)
        .list_deployed_revisions(&token(), "a1")
        .await
        .unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].id, "rev1");
    assert_eq!(revisions[0].deployment_info[0].vhost, "api.acme.com");
}

#[tokio::test]
async fn create_revision_posts_description_and_requires_201() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apis/a1/revisions"))
        .and(header("Authorization", "Bearer T1"))
        .and(body_json(json!({"description": "Routine redeployment"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "rev2",
            "description": "Routine redeployment"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_revision(&token(), "a1", "Routine redeployment")
        .await
        .unwrap();
    assert_eq!(created.id, "rev2");
}

#[tokio::test]
async fn create_revision_with_ok_status_is_still_a_failure() {
    let server = MockServer::start().await;

    // The platform answers 201 on success; a 200 here means something else
    // handled the request.
    Mock::given(method("POST"))
        .and(path("/apis/a1/revisions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "rev2"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_revision(&token(), "a1", "desc")
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::UnexpectedStatus { status: 200, .. }));
}

#[tokio::test]
async fn deploy_revision_stamps_every_entry_with_the_new_revision_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apis/a1/deploy-revision"))
        .and(query_param("revisionId", "rev2"))
        .and(header("Authorization", "Bearer T1"))
        .and(body_json(json!([
            {
                "revisionUuid": "rev2",
                "name": "Production",
                "vhost": "api.acme.com",
                "displayOnDevportal": true
            },
            {
                "revisionUuid": "rev2",
                "name": "Sandbox",
                "vhost": "sandbox.acme.com",
                "displayOnDevportal": false
            }
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"name": "Production", "vhost": "api.acme.com", "status": "CREATED"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let bindings = vec![
        DeploymentBinding {
            name: "Production".to_string(),
            vhost: "api.acme.com".to_string(),
            display_on_devportal: true,
        },
        DeploymentBinding {
            name: "Sandbox".to_string(),
            vhost: "sandbox.acme.com".to_string(),
            display_on_devportal: false,
        },
    ];

    client(&server)
        .deploy_revision(&token(), "a1", "rev2", &bindings)
        .await
        .unwrap();
}

#[tokio::test]
async fn deploy_revision_gateway_rejection_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apis/a1/deploy-revision"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown vhost"))
        .mount(&server)
        .await;

    let err = client(&server)
        .deploy_revision(&token(), "a1", "rev2", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::UnexpectedStatus { status: 400, .. }));
}

#[tokio::test]
async fn expired_token_reads_as_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apis/a1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 900901,
            "message": "Invalid Credentials"
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_api(&token(), "a1").await.unwrap_err();
    assert!(matches!(err, ConnectorError::Unauthorized(_)));
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Listing Applications.Core resources through the REST surface

mod common;

use std::sync::Arc;

use armkit_database::InMemoryDatabaseClient;
use axum::http::StatusCode;
use common::{API_VERSION, RG, app, get, save, stored_container, stored_environment};
use serde_json::json;

#[tokio::test]
async fn containers_are_projected_to_the_requested_version() {
    let store = Arc::new(InMemoryDatabaseClient::new());
    save(&store, stored_container(RG, "api")).await;
    save(&store, stored_container(RG, "web")).await;
    let app = app(store);

    let (status, body) = get(
        &app,
        &format!("{RG}/providers/Applications.Core/containers?api-version={API_VERSION}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let items = body["value"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let api = &items[0];
    assert_eq!(api["name"], "api");
    assert_eq!(api["properties"]["provisioningState"], "Succeeded");
    assert_eq!(
        api["properties"]["container"]["livenessProbe"]["kind"],
        "exec"
    );
    assert_eq!(api["properties"]["extensions"][0]["kind"], "daprSidecar");
    assert_eq!(
        api["properties"]["status"]["outputResources"][0]["localID"],
        "Deployment"
    );
    assert!(
        api.get("tenantId").is_none(),
        "internal metadata never leaves the store"
    );
    assert!(api.get("asyncProvisioningState").is_none());
}

#[tokio::test]
async fn environments_list_across_the_plane() {
    let store = Arc::new(InMemoryDatabaseClient::new());
    save(&store, stored_environment(RG, "dev")).await;
    let ops = "/planes/radius/local/resourceGroups/ops";
    save(&store, stored_environment(ops, "prod")).await;
    let app = app(store);

    let plane = "/planes/radius/local";
    let uri = format!("{plane}/providers/Applications.Core/environments?api-version={API_VERSION}");
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["value"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"dev".to_owned()));
    assert!(names.contains(&"prod".to_owned()));
    let dev = body["value"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["name"] == "dev")
        .unwrap();
    let redis = &dev["properties"]["recipes"]["Applications.Datastores/redisCaches"];
    assert_eq!(redis["default"]["templateKind"], "bicep");
}

#[tokio::test]
async fn unknown_version_is_a_client_error() {
    let app = app(Arc::new(InMemoryDatabaseClient::new()));
    let (status, body) = get(
        &app,
        &format!("{RG}/providers/Applications.Core/volumes?api-version=2022-03-15-privatepreview"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "InvalidApiVersionParameter");
}

#[tokio::test]
async fn undecodable_stored_item_fails_the_whole_page() {
    let store = Arc::new(InMemoryDatabaseClient::new());
    save(&store, stored_container(RG, "api")).await;
    let mut broken = stored_container(RG, "zzz");
    broken["properties"]["extensions"] = json!([{ "kind": "istio" }]);
    save(&store, broken).await;
    let app = app(store);

    let (status, body) = get(
        &app,
        &format!("{RG}/providers/Applications.Core/containers?api-version={API_VERSION}"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("value").is_none());
}

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures for Applications.Core tests

use std::sync::Arc;
use std::time::Duration;

use armkit::ConverterRegistry;
use armkit::rest::{ApiState, ListRouter, router};
use armkit_database::{DatabaseClient, InMemoryDatabaseClient, Object};
use armkit_resource_id::ResourceId;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt as _;

pub const API_VERSION: &str = "2023-10-01-preview";
pub const RG: &str = "/planes/radius/local/resourceGroups/shop";
pub const APP: &str =
    "/planes/radius/local/resourceGroups/shop/providers/Applications.Core/applications/shop";

pub fn resource_id(scope: &str, resource_type: &str, name: &str) -> ResourceId {
    ResourceId::parse(&format!("{scope}/providers/{resource_type}/{name}")).unwrap()
}

/// A stored container document as the control plane writes it.
pub fn stored_container(scope: &str, name: &str) -> Value {
    let id = resource_id(scope, "Applications.Core/containers", name);
    let deployment =
        format!("/planes/kubernetes/local/namespaces/shop/providers/apps/Deployment/{name}");
    json!({
        "id": id.as_str(),
        "name": name,
        "type": "Applications.Core/containers",
        "location": "global",
        "systemData": {},
        "tenantId": "t1",
        "createdApiVersion": API_VERSION,
        "updatedApiVersion": API_VERSION,
        "asyncProvisioningState": "Succeeded",
        "properties": {
            "application": APP,
            "container": {
                "image": format!("ghcr.io/shop/{name}:1.0"),
                "livenessProbe": { "kind": "exec", "command": "true" }
            },
            "extensions": [{ "kind": "daprSidecar", "appId": name }],
            "status": {
                "outputResources": [
                    { "localID": "Deployment", "id": deployment, "radiusManaged": true }
                ]
            }
        }
    })
}

pub fn stored_environment(scope: &str, name: &str) -> Value {
    let id = resource_id(scope, "Applications.Core/environments", name);
    json!({
        "id": id.as_str(),
        "name": name,
        "type": "Applications.Core/environments",
        "location": "global",
        "asyncProvisioningState": "Succeeded",
        "properties": {
            "compute": { "kind": "kubernetes", "namespace": name },
            "recipes": {
                "Applications.Datastores/redisCaches": {
                    "default": {
                        "templateKind": "bicep",
                        "templatePath": "ghcr.io/recipes/redis:latest"
                    }
                }
            }
        }
    })
}

pub async fn save(store: &InMemoryDatabaseClient, doc: Value) {
    let id = ResourceId::parse(doc["id"].as_str().unwrap()).unwrap();
    store.save(Object::new(&id, doc)).await.unwrap();
}

pub fn app(store: Arc<InMemoryDatabaseClient>) -> Router {
    let db: Arc<dyn DatabaseClient> = store;
    let converters = Arc::new(corerp::register_converters(ConverterRegistry::new()));
    let lists = corerp::register_lists(ListRouter::new(), &db, &converters);
    router(ApiState::new(lists), Duration::from_secs(5))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", "localhost:8080")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

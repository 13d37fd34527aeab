#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for scoped queries against the in-memory store.
//!
//! These tests cover page continuity across cursor-chained requests, recursive and
//! exact scope matching, and token validation.

use std::collections::HashSet;

use armkit_database::{
    DatabaseClient, DatabaseError, InMemoryDatabaseClient, Object, Query, QueryOptions,
};
use armkit_resource_id::ResourceId;

// ============================================================================
// Helper Functions
// ============================================================================

const CONTAINERS: &str = "Applications.Core/containers";
const RG1: &str = "/planes/radius/local/resourceGroups/rg1";

async fn seed(db: &InMemoryDatabaseClient, scope: &str, resource_type: &str, name: &str) {
    let id = ResourceId::parse(&format!("{scope}/providers/{resource_type}/{name}")).unwrap();
    db.save(Object::new(&id, serde_json::json!({ "name": name })))
        .await
        .unwrap();
}

async fn collect_all(
    db: &InMemoryDatabaseClient,
    query: &Query,
    top: usize,
) -> (Vec<String>, usize) {
    let mut ids = Vec::new();
    let mut token = None;
    let mut pages = 0;
    loop {
        let opts = QueryOptions::new()
            .with_pagination_token(token)
            .with_max_query_item_count(Some(top));
        let page = db.query(query, &opts).await.unwrap();
        pages += 1;
        assert!(page.items.len() <= top);
        ids.extend(page.items.into_iter().map(|o| o.metadata.id));
        token = page.pagination_token;
        if token.is_none() {
            break;
        }
    }
    (ids, pages)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn pagination_yields_every_item_exactly_once() {
    let db = InMemoryDatabaseClient::new();
    for i in 0..23 {
        seed(&db, RG1, CONTAINERS, &format!("c{i:02}")).await;
    }
    let query = Query::new(RG1, CONTAINERS);

    let (ids, pages) = collect_all(&db, &query, 5).await;
    assert_eq!(ids.len(), 23);
    assert_eq!(pages, 5);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 23);
}

#[tokio::test]
async fn exact_multiple_of_page_size_ends_without_token() {
    let db = InMemoryDatabaseClient::new();
    for i in 0..10 {
        seed(&db, RG1, CONTAINERS, &format!("c{i}")).await;
    }
    let query = Query::new(RG1, CONTAINERS);

    let (ids, pages) = collect_all(&db, &query, 5).await;
    assert_eq!(ids.len(), 10);
    assert_eq!(pages, 2);
}

#[tokio::test]
async fn deleting_returned_items_does_not_skip_remaining_ones() {
    let db = InMemoryDatabaseClient::new();
    for i in 0..6 {
        seed(&db, RG1, CONTAINERS, &format!("c{i}")).await;
    }
    let query = Query::new(RG1, CONTAINERS);
    let opts = QueryOptions::new().with_max_query_item_count(Some(3));
    let first = db.query(&query, &opts).await.unwrap();
    for item in &first.items {
        db.delete(&ResourceId::parse(&item.metadata.id).unwrap())
            .await
            .unwrap();
    }

    let second = db
        .query(
            &query,
            &QueryOptions::new()
                .with_pagination_token(first.pagination_token)
                .with_max_query_item_count(Some(3)),
        )
        .await
        .unwrap();
    let names: Vec<_> = second
        .items
        .iter()
        .map(|o| o.data["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["c3", "c4", "c5"]);
    assert!(second.pagination_token.is_none());
}

#[tokio::test]
async fn recursive_query_spans_descendant_scopes() {
    let db = InMemoryDatabaseClient::new();
    let rg2 = "/planes/radius/local/resourceGroups/rg2";
    let other_plane = "/planes/radius/other/resourceGroups/rg1";
    seed(&db, RG1, CONTAINERS, "a").await;
    seed(&db, rg2, CONTAINERS, "b").await;
    seed(&db, other_plane, CONTAINERS, "c").await;
    seed(&db, RG1, "Applications.Core/volumes", "v").await;

    let recursive = Query::new("/planes/radius/local", CONTAINERS).with_scope_recursive(true);
    let page = db.query(&recursive, &QueryOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 2);

    let exact = Query::new("/planes/radius/local", CONTAINERS);
    let page = db.query(&exact, &QueryOptions::new()).await.unwrap();
    assert!(page.items.is_empty());

    let exact_rg = Query::new(RG1, CONTAINERS);
    let page = db.query(&exact_rg, &QueryOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn recursive_scope_does_not_match_sibling_prefix() {
    let db = InMemoryDatabaseClient::new();
    let rg10 = "/planes/radius/local/resourceGroups/rg10";
    seed(&db, RG1, CONTAINERS, "a").await;
    seed(&db, rg10, CONTAINERS, "b").await;

    let q = Query::new(RG1, CONTAINERS).with_scope_recursive(true);
    let page = db.query(&q, &QueryOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn type_and_scope_matching_ignore_case() {
    let db = InMemoryDatabaseClient::new();
    let upper = "/planes/radius/local/resourceGroups/RG1";
    seed(&db, upper, CONTAINERS, "a").await;

    let q = Query::new(
        "/planes/radius/local/resourcegroups/rg1",
        "applications.core/CONTAINERS",
    );
    let page = db.query(&q, &QueryOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn empty_scope_returns_empty_page_without_token() {
    let db = InMemoryDatabaseClient::new();
    let q = Query::new("/planes/radius/local/resourceGroups/empty", CONTAINERS);
    let page = db.query(&q, &QueryOptions::new()).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.pagination_token.is_none());
}

#[tokio::test]
async fn default_page_size_applies_without_top() {
    let db = InMemoryDatabaseClient::with_default_page_size(4);
    for i in 0..9 {
        seed(&db, RG1, CONTAINERS, &format!("c{i}")).await;
    }
    let q = Query::new(RG1, CONTAINERS);
    let page = db.query(&q, &QueryOptions::new()).await.unwrap();
    assert_eq!(page.items.len(), 4);
    assert!(page.pagination_token.is_some());
}

#[tokio::test]
async fn foreign_or_corrupt_tokens_are_rejected() {
    let db = InMemoryDatabaseClient::new();
    for i in 0..4 {
        seed(&db, RG1, CONTAINERS, &format!("c{i}")).await;
    }
    let q = Query::new(RG1, CONTAINERS);
    let opts = QueryOptions::new().with_max_query_item_count(Some(2));
    let first = db.query(&q, &opts).await.unwrap();

    let other = Query::new(RG1, "Applications.Core/volumes");
    let err = db
        .query(
            &other,
            &QueryOptions::new().with_pagination_token(first.pagination_token),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidPaginationToken(_)));

    let err = db
        .query(
            &q,
            &QueryOptions::new().with_pagination_token(Some("not a token".to_owned())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidPaginationToken(_)));
}

#[tokio::test]
async fn invalid_query_is_rejected() {
    let db = InMemoryDatabaseClient::new();
    let q = Query::new("/planes/radius/local", "");
    let err = db.query(&q, &QueryOptions::new()).await.unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidQuery(_)));
}

//! Preloading the in-memory store from a JSON file of stored documents.

use std::path::Path;

use anyhow::{Context, Result};
use armkit_database::{DatabaseClient, Object};
use armkit_resource_id::ResourceId;
use serde_json::Value;

/// Save every document of the JSON array at `path`. Each document needs a string `id`.
///
/// # Errors
/// Fails on an unreadable file, a body that is not an array, a document without a
/// valid `id`, or a store rejection.
pub async fn load(db: &dyn DatabaseClient, path: &Path) -> Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let docs: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("seed file {} must hold a JSON array", path.display()))?;

    let count = docs.len();
    for (i, doc) in docs.into_iter().enumerate() {
        let raw_id = doc
            .get("id")
            .and_then(Value::as_str)
            .with_context(|| format!("seed document #{i} has no string 'id'"))?;
        let id = ResourceId::parse(raw_id)
            .with_context(|| format!("seed document #{i} has an invalid id"))?;
        db.save(Object::new(&id, doc))
            .await
            .with_context(|| format!("failed to store seed document '{id}'"))?;
    }
    tracing::info!(count, path = %path.display(), "seeded store");
    Ok(count)
}

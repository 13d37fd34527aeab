//! In-memory store client.
//!
//! Objects are kept in a `BTreeMap` keyed by the lowercased resource id, so iteration
//! order is the page order. Pages resume strictly after the last returned key, which
//! keeps enumeration free of duplicates and never skips an object that still exists.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

use armkit_resource_id::{ResourceId, scope_contains};
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::client::{DatabaseClient, DatabaseError};
use crate::cursor::PageCursor;
use crate::object::{Object, ObjectQueryResult};
use crate::query::{Query, QueryOptions};

/// Page size used when a query does not carry `max_query_item_count`.
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone)]
struct StoredEntry {
    root_scope: String,
    resource_type: String,
    object: Object,
}

/// Thread-safe in-memory implementation of [`DatabaseClient`].
pub struct InMemoryDatabaseClient {
    entries: RwLock<BTreeMap<String, StoredEntry>>,
    default_page_size: usize,
    etag_seq: AtomicU64,
}

impl Default for InMemoryDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabaseClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a store whose pages default to `size` items. Zero falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn with_default_page_size(size: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            default_page_size: if size == 0 { DEFAULT_PAGE_SIZE } else { size },
            etag_seq: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn next_etag(&self) -> String {
        let n = self.etag_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("\"{n:016x}\"")
    }
}

fn entry_matches(entry: &StoredEntry, query: &Query) -> bool {
    if !entry
        .resource_type
        .eq_ignore_ascii_case(&query.resource_type)
    {
        return false;
    }
    if query.scope_recursive {
        scope_contains(&query.root_scope, &entry.root_scope)
    } else {
        entry
            .root_scope
            .trim_end_matches('/')
            .eq_ignore_ascii_case(query.root_scope.trim_end_matches('/'))
    }
}

#[async_trait]
impl DatabaseClient for InMemoryDatabaseClient {
    async fn query(
        &self,
        query: &Query,
        options: &QueryOptions,
    ) -> Result<ObjectQueryResult, DatabaseError> {
        query.validate()?;

        let start = match options.pagination_token.as_deref() {
            Some(token) => Bound::Excluded(PageCursor::decode(token, query)?.last_key),
            None => Bound::Unbounded,
        };
        let limit = options
            .max_query_item_count
            .unwrap_or(self.default_page_size);

        let entries = self.entries.read();
        // Fetch limit+1 to detect whether another page exists.
        let mut page: Vec<(&String, &StoredEntry)> = entries
            .range((start, Bound::Unbounded))
            .filter(|(_, entry)| entry_matches(entry, query))
            .take(limit.saturating_add(1))
            .collect();

        let has_more = page.len() > limit;
        page.truncate(limit);

        let pagination_token = match (has_more, page.last()) {
            (true, Some((key, _))) => Some(
                PageCursor::new(query, key.as_str())
                    .encode()
                    .map_err(|e| DatabaseError::Backend(e.to_string()))?,
            ),
            _ => None,
        };

        let items: Vec<Object> = page.into_iter().map(|(_, e)| e.object.clone()).collect();
        tracing::debug!(
            root_scope = %query.root_scope,
            resource_type = %query.resource_type,
            recursive = query.scope_recursive,
            count = items.len(),
            has_more,
            "in-memory query"
        );

        Ok(ObjectQueryResult {
            items,
            pagination_token,
        })
    }

    async fn get(&self, id: &ResourceId) -> Result<Object, DatabaseError> {
        self.entries
            .read()
            .get(&id.as_str().to_ascii_lowercase())
            .map(|e| e.object.clone())
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }

    async fn save(&self, mut object: Object) -> Result<Object, DatabaseError> {
        let id = ResourceId::parse(&object.metadata.id)
            .map_err(|e| DatabaseError::InvalidQuery(e.to_string()))?;
        if id.is_scope() || id.is_resource_collection() {
            return Err(DatabaseError::InvalidQuery(format!("'{id}' does not name a resource")));
        }
        let key = id.as_str().to_ascii_lowercase();

        let mut entries = self.entries.write();
        if let Some(expected) = object.metadata.etag.as_deref() {
            let current = entries
                .get(&key)
                .and_then(|e| e.object.metadata.etag.as_deref());
            if current != Some(expected) {
                return Err(DatabaseError::ConcurrencyConflict(id.to_string()));
            }
        }

        object.metadata.id = id.to_string();
        object.metadata.etag = Some(self.next_etag());
        entries.insert(
            key,
            StoredEntry {
                root_scope: id.root_scope(),
                resource_type: id.resource_type(),
                object: object.clone(),
            },
        );
        Ok(object)
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), DatabaseError> {
        self.entries
            .write()
            .remove(&id.as_str().to_ascii_lowercase())
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }
}

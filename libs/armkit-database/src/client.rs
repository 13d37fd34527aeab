use armkit_resource_id::ResourceId;
use async_trait::async_trait;

use crate::object::{Object, ObjectQueryResult};
use crate::query::{Query, QueryOptions};

/// Errors surfaced by a store client.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("resource '{0}' not found")]
    NotFound(String),

    #[error("etag mismatch for resource '{0}'")]
    ConcurrencyConflict(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The caller passed a pagination token this store did not issue.
    #[error("invalid pagination token: {0}")]
    InvalidPaginationToken(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Scoped store client.
///
/// Implementations own retries and consistency. Pagination tokens are opaque to every
/// caller and must be returned verbatim.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Run a scoped query and return one page.
    async fn query(
        &self,
        query: &Query,
        options: &QueryOptions,
    ) -> Result<ObjectQueryResult, DatabaseError>;

    async fn get(&self, id: &ResourceId) -> Result<Object, DatabaseError>;

    /// Create or replace an object. A populated `metadata.etag` is an optimistic
    /// concurrency precondition. The stored object (with its new etag) is returned.
    async fn save(&self, object: Object) -> Result<Object, DatabaseError>;

    async fn delete(&self, id: &ResourceId) -> Result<(), DatabaseError>;
}

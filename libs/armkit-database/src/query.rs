use crate::client::DatabaseError;

/// A scoped query over one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Query {
    /// Scope prefix, e.g. `/planes/radius/local/resourceGroups/rg1`.
    pub root_scope: String,
    /// Fully-qualified resource type, e.g. `Applications.Core/containers`.
    pub resource_type: String,
    /// When true, resources in descendant scopes of `root_scope` match too.
    pub scope_recursive: bool,
}

impl Query {
    pub fn new(root_scope: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            root_scope: root_scope.into(),
            resource_type: resource_type.into(),
            scope_recursive: false,
        }
    }

    pub fn with_scope_recursive(mut self, recursive: bool) -> Self {
        self.scope_recursive = recursive;
        self
    }

    /// Check the query is well-formed before it reaches a backend.
    ///
    /// # Errors
    /// Returns `DatabaseError::InvalidQuery` when the root scope or resource type is empty.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.root_scope.trim().is_empty() {
            return Err(DatabaseError::InvalidQuery("root scope is required".to_owned()));
        }
        if self.resource_type.trim().is_empty() {
            return Err(DatabaseError::InvalidQuery("resource type is required".to_owned()));
        }
        Ok(())
    }
}

/// Paging controls passed alongside a [`Query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct QueryOptions {
    /// Opaque continuation token from a previous page.
    pub pagination_token: Option<String>,
    /// Upper bound on the page size. `None` means the store default.
    pub max_query_item_count: Option<usize>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume after the page that produced `token`. Empty tokens are ignored.
    pub fn with_pagination_token(mut self, token: Option<String>) -> Self {
        self.pagination_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Bound the page size. Zero is treated as "store default".
    pub fn with_max_query_item_count(mut self, top: Option<usize>) -> Self {
        self.max_query_item_count = top.filter(|n| *n > 0);
        self
    }
}

use armkit_database::DatabaseError;

use crate::conv::ConversionError;

/// Failure of a controller operation, before it is mapped onto the ARM error envelope.
#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    /// No projection is registered for the requested api version.
    #[error("api version '{api_version}' is not supported for resource type '{resource_type}'")]
    UnsupportedApiVersion {
        resource_type: String,
        api_version: String,
    },

    /// The store rejected the continuation token.
    #[error("invalid skip token: {0}")]
    InvalidSkipToken(String),

    /// The store call itself failed.
    #[error("store query failed: {0}")]
    Store(#[source] DatabaseError),

    /// A stored item could not be shaped into the resource type.
    #[error("stored resource '{id}' could not be read: {source}")]
    Materialization {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored resource could not be projected into the versioned shape.
    #[error("stored resource '{id}' could not be projected: {source}")]
    Projection {
        id: String,
        #[source]
        source: ConversionError,
    },
}

impl From<DatabaseError> for ControllerError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidPaginationToken(msg) => Self::InvalidSkipToken(msg),
            other => Self::Store(other),
        }
    }
}

impl ControllerError {
    /// True for failures caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedApiVersion { .. } | Self::InvalidSkipToken(_)
        )
    }
}

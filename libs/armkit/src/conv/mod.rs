//! Versioned projections between the stored model and wire models.
//!
//! Each resource type has one canonical [`DataModel`]. Every API version of that type
//! is a [`VersionedModel`] with a pure conversion in each direction. The
//! [`ConverterRegistry`] indexes projections by `(resource type, api version)`.

mod registry;

pub use registry::ConverterRegistry;

use armkit_polymorphic::CodecError;
use armkit_resource_id::ResourceId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Canonical stored representation of one resource type.
pub trait DataModel: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Fully-qualified resource type, e.g. `Applications.Core/containers`.
    const RESOURCE_TYPE: &'static str;
}

/// One API version's wire representation of `T`.
pub trait VersionedModel<T: DataModel>: Serialize + DeserializeOwned + Send + Sync + 'static {
    const API_VERSION: &'static str;

    /// Outbound projection. Total over every stored state; read-only fields are
    /// emitted when present.
    fn from_datamodel(model: &T) -> Self;

    /// Inbound projection of a request body for the resource at `id`.
    ///
    /// Read-only fields of the body are ignored; identity comes from `id`.
    ///
    /// # Errors
    /// Returns `ConversionError::Validation` or `ConversionError::UnsupportedVariant`
    /// when the body cannot be represented in the stored model.
    fn to_datamodel(self, id: &ResourceId) -> Result<T, ConversionError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ConversionError {
    #[error("api version '{api_version}' is not supported for resource type '{resource_type}'")]
    UnsupportedApiVersion {
        resource_type: String,
        api_version: String,
    },

    #[error("projection for '{resource_type}' is registered with a different model than {expected}")]
    ModelMismatch {
        resource_type: String,
        expected: &'static str,
    },

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{field}: {family} kind '{kind}' is not supported")]
    UnsupportedVariant {
        field: String,
        family: &'static str,
        kind: String,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ConversionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a base (unrecognized) variant of a polymorphic family reaching
    /// the stored model.
    pub fn unsupported_variant<U: armkit_polymorphic::Polymorphic>(
        field: impl Into<String>,
        value: &U,
    ) -> Self {
        Self::UnsupportedVariant {
            field: field.into(),
            family: U::FAMILY,
            kind: value.discriminator().unwrap_or("<none>").to_owned(),
        }
    }

    /// Whether the caller sent something unacceptable, as opposed to a server fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedApiVersion { .. }
                | Self::InvalidBody(_)
                | Self::Validation { .. }
                | Self::UnsupportedVariant { .. }
                | Self::Codec(_)
        )
    }
}

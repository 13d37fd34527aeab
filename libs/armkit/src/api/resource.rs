//! Resource envelope shared by every resource type.

use std::collections::BTreeMap;

use armkit_resource_id::ResourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an asynchronous resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProvisioningState {
    #[default]
    Accepted,
    Provisioning,
    Updating,
    Deleting,
    Succeeded,
    Failed,
    Canceled,
}

impl ProvisioningState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatedByType {
    User,
    Application,
    ManagedIdentity,
    Key,
}

/// Creation and last-modification metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// Identity, location and tags of a tracked resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackedResource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Bookkeeping that never leaves the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_api_version: String,
    #[serde(default)]
    pub async_provisioning_state: ProvisioningState,
}

/// Common part of every stored resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResource {
    #[serde(flatten)]
    pub tracked: TrackedResource,
    #[serde(default)]
    pub system_data: SystemData,
    #[serde(flatten)]
    pub internal: InternalMetadata,
}

impl BaseResource {
    /// Base for a resource created or updated by a request on `id`.
    ///
    /// Identity comes from the request path, never from the body. The provisioning
    /// state starts at `Accepted`.
    #[must_use]
    pub fn for_request(
        id: &ResourceId,
        location: String,
        tags: BTreeMap<String, String>,
        api_version: &str,
    ) -> Self {
        Self {
            tracked: TrackedResource {
                id: id.to_string(),
                name: id.name().unwrap_or_default(),
                resource_type: id.resource_type(),
                location,
                tags,
            },
            system_data: SystemData::default(),
            internal: InternalMetadata {
                tenant_id: String::new(),
                created_api_version: api_version.to_owned(),
                updated_api_version: api_version.to_owned(),
                async_provisioning_state: ProvisioningState::Accepted,
            },
        }
    }

    #[must_use]
    pub fn provisioning_state(&self) -> ProvisioningState {
        self.internal.async_provisioning_state
    }
}

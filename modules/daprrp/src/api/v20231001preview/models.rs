use std::collections::BTreeMap;

use armkit::api::ProvisioningState;
use corerp::api::v20231001preview::common::{ResourceEnvelope, ResourceReference, ResourceStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::datamodel::{DaprResourceAuth, MetadataValue, ResourceProvisioning};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

/// Properties of state stores, pub/sub brokers and configuration stores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaprResourceProperties {
    #[serde(default)]
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<DaprResourceAuth>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provisioning: Option<ResourceProvisioning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceReference>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

/// Secret store properties: a component without `auth` or `resources`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaprSecretStoreProperties {
    #[serde(default)]
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provisioning: Option<ResourceProvisioning>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

impl From<DaprSecretStoreProperties> for DaprResourceProperties {
    fn from(p: DaprSecretStoreProperties) -> Self {
        Self {
            environment: p.environment,
            application: p.application,
            auth: None,
            metadata: p.metadata,
            recipe: p.recipe,
            resource_provisioning: p.resource_provisioning,
            resources: Vec::new(),
            component_type: p.component_type,
            version: p.version,
            component_name: p.component_name,
            provisioning_state: p.provisioning_state,
            status: p.status,
        }
    }
}

impl From<DaprResourceProperties> for DaprSecretStoreProperties {
    fn from(p: DaprResourceProperties) -> Self {
        Self {
            environment: p.environment,
            application: p.application,
            metadata: p.metadata,
            recipe: p.recipe,
            resource_provisioning: p.resource_provisioning,
            component_type: p.component_type,
            version: p.version,
            component_name: p.component_name,
            provisioning_state: p.provisioning_state,
            status: p.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprStateStoreResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: DaprResourceProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprPubSubBrokerResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: DaprResourceProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprConfigurationStoreResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: DaprResourceProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprSecretStoreResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: DaprSecretStoreProperties,
}

//! Stored models of the `Applications.Dapr` resource types.
//!
//! All four types describe a Dapr component and share [`DaprComponentProperties`];
//! they differ only in resource type and in which optional parts apply.

use std::collections::BTreeMap;

use armkit::DataModel;
use armkit::api::BaseResource;
use armkit_resourcemodel::{BasicResourceProperties, ResourceReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATE_STORE_RESOURCE_TYPE: &str = "Applications.Dapr/stateStores";
pub const PUB_SUB_BROKER_RESOURCE_TYPE: &str = "Applications.Dapr/pubSubBrokers";
pub const SECRET_STORE_RESOURCE_TYPE: &str = "Applications.Dapr/secretStores";
pub const CONFIGURATION_STORE_RESOURCE_TYPE: &str = "Applications.Dapr/configurationStores";

/// Recipe used when none is named.
pub const DEFAULT_RECIPE_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceProvisioning {
    /// The control plane runs a recipe to create the backing infrastructure.
    #[default]
    Recipe,
    /// The user supplies the component's type, version and metadata.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceRecipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

/// A component metadata entry: a literal value or a reference to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<MetadataValueFromSecret>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataValueFromSecret {
    /// Secret name in the secret store.
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaprResourceAuth {
    /// Name of the Dapr secret store that resolves `secretKeyRef` metadata.
    pub secret_store: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaprComponentProperties {
    #[serde(flatten)]
    pub basic: BasicResourceProperties,
    #[serde(default)]
    pub resource_provisioning: ResourceProvisioning,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<ResourceRecipe>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
    /// Dapr component type, e.g. `state.redis`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<DaprResourceAuth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceReference>,
    /// Name of the rendered Dapr component. Set by the control plane.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprStateStore {
    #[serde(flatten)]
    pub base: BaseResource,
    pub properties: DaprComponentProperties,
}

impl DataModel for DaprStateStore {
    const RESOURCE_TYPE: &'static str = STATE_STORE_RESOURCE_TYPE;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprPubSubBroker {
    #[serde(flatten)]
    pub base: BaseResource,
    pub properties: DaprComponentProperties,
}

impl DataModel for DaprPubSubBroker {
    const RESOURCE_TYPE: &'static str = PUB_SUB_BROKER_RESOURCE_TYPE;
}

/// Secret stores never carry `auth` or `resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprSecretStore {
    #[serde(flatten)]
    pub base: BaseResource,
    pub properties: DaprComponentProperties,
}

impl DataModel for DaprSecretStore {
    const RESOURCE_TYPE: &'static str = SECRET_STORE_RESOURCE_TYPE;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaprConfigurationStore {
    #[serde(flatten)]
    pub base: BaseResource,
    pub properties: DaprComponentProperties,
}

impl DataModel for DaprConfigurationStore {
    const RESOURCE_TYPE: &'static str = CONFIGURATION_STORE_RESOURCE_TYPE;
}

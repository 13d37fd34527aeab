use std::collections::BTreeMap;

use armkit::api::ProvisioningState;
use armkit_polymorphic::discriminated_union;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{EnvironmentComputeClassification, ResourceEnvelope};
use super::extension::ExtensionClassification;
use crate::datamodel::environment::Providers;

/// `Applications.Core/environments` as sent and received in this version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: EnvironmentProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<EnvironmentComputeClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<Providers>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recipes: BTreeMap<String, BTreeMap<String, RecipePropertiesClassification>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated: Option<bool>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BicepRecipeProperties {
    pub template_path: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_http: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformRecipeProperties {
    pub template_path: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
}

discriminated_union! {
    /// A recipe registered on an environment, keyed by template engine.
    pub enum RecipePropertiesClassification {
        field = "templateKind",
        base = Base(RecipeProperties) by template_kind,
        "bicep" => Bicep(BicepRecipeProperties),
        "terraform" => Terraform(TerraformRecipeProperties),
    }
}

use std::collections::BTreeMap;

use armkit::DataModel;
use armkit::api::BaseResource;
use armkit_resourcemodel::EnvironmentCompute;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::datamodel::container::Extension;

pub const ENVIRONMENT_RESOURCE_TYPE: &str = "Applications.Core/environments";

/// Stored `Applications.Core/environments` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(flatten)]
    pub base: BaseResource,
    pub properties: EnvironmentProperties,
}

impl DataModel for Environment {
    const RESOURCE_TYPE: &'static str = ENVIRONMENT_RESOURCE_TYPE;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProperties {
    pub compute: EnvironmentCompute,
    #[serde(default, skip_serializing_if = "Providers::is_empty")]
    pub providers: Providers,
    /// Recipes keyed by portable resource type, then by recipe name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub recipes: BTreeMap<String, BTreeMap<String, EnvironmentRecipeProperties>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    /// Deployments into a simulated environment render but never touch infrastructure.
    #[serde(default)]
    pub simulated: bool,
}

/// Cloud scopes an environment may deploy into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Providers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<ProviderScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<ProviderScope>,
}

impl Providers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.azure.is_none() && self.aws.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderScope {
    pub scope: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeTemplateKind {
    Bicep,
    Terraform,
}

impl RecipeTemplateKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bicep => "bicep",
            Self::Terraform => "terraform",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRecipeProperties {
    pub template_kind: RecipeTemplateKind,
    pub template_path: String,
    /// Terraform module version. Unused for bicep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    /// Bicep registries reachable over plain HTTP.
    #[serde(default)]
    pub plain_http: bool,
}

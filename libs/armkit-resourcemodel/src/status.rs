use serde::{Deserialize, Serialize};

use crate::compute::EnvironmentCompute;
use crate::output::OutputResource;

/// Reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    pub id: String,
}

/// Which recipe template produced a resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStatus {
    pub template_kind: String,
    pub template_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
}

/// Runtime status of a resource, populated by the control plane.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<EnvironmentCompute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_resources: Vec<OutputResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeStatus>,
}

impl ResourceStatus {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compute.is_none() && self.output_resources.is_empty() && self.recipe.is_none()
    }
}

/// Properties shared by application-scoped resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicResourceProperties {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
    #[serde(default, skip_serializing_if = "ResourceStatus::is_empty")]
    pub status: ResourceStatus,
}

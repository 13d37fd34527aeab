use serde::{Deserialize, Serialize};

/// Compute platform an environment deploys to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentCompute {
    #[serde(flatten)]
    pub kind: ComputeKind,
    /// Resource id of the compute platform itself, when it is an ARM resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentitySettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComputeKind {
    Kubernetes { namespace: String },
}

impl ComputeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kubernetes { .. } => "kubernetes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentitySettingKind {
    #[default]
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "azure.com.workload")]
    AzureWorkload,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySettings {
    pub kind: IdentitySettingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

//! Wire types shared by every resource of this API version, and their projections.

use std::collections::BTreeMap;

use armkit::api::{BaseResource, SystemData};
use armkit::conv::ConversionError;
use armkit_polymorphic::discriminated_union;
use armkit_resource_id::ResourceId;
use armkit_resourcemodel as rm;
use serde::{Deserialize, Serialize};

use super::API_VERSION;

/// Location given to resources created without one.
pub const DEFAULT_LOCATION: &str = "global";

/// Envelope fields of a tracked resource. Everything except `location` and `tags` is
/// read-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
}

impl ResourceEnvelope {
    #[must_use]
    pub fn from_base(base: &BaseResource) -> Self {
        Self {
            id: Some(base.tracked.id.clone()),
            name: Some(base.tracked.name.clone()),
            resource_type: Some(base.tracked.resource_type.clone()),
            location: Some(base.tracked.location.clone()),
            tags: base.tracked.tags.clone(),
            system_data: Some(base.system_data.clone()),
        }
    }

    /// Stored envelope for a write on `id`. Identity fields of the body are ignored.
    #[must_use]
    pub fn into_base(self, id: &ResourceId) -> BaseResource {
        let location = self
            .location
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_owned());
        BaseResource::for_request(id, location, self.tags, API_VERSION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentitySettingKind {
    #[default]
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "azure.com.workload")]
    AzureComWorkload,
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

/// Base shape of the compute family; also what unknown kinds decode into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentitySettings>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesCompute {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentitySettings>,
}

discriminated_union! {
    /// Compute platform of an environment.
    pub enum EnvironmentComputeClassification {
        field = "kind",
        base = Base(EnvironmentCompute) by kind,
        "kubernetes" => Kubernetes(KubernetesCompute),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "localID", default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_managed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStatus {
    pub template_kind: String,
    pub template_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
}

/// Read-only runtime status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<EnvironmentComputeClassification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_resources: Vec<OutputResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeStatus>,
}

impl From<rm::IdentitySettingKind> for IdentitySettingKind {
    fn from(kind: rm::IdentitySettingKind) -> Self {
        match kind {
            rm::IdentitySettingKind::Undefined => Self::Undefined,
            rm::IdentitySettingKind::AzureWorkload => Self::AzureComWorkload,
        }
    }
}

impl From<IdentitySettingKind> for rm::IdentitySettingKind {
    fn from(kind: IdentitySettingKind) -> Self {
        match kind {
            IdentitySettingKind::Undefined => Self::Undefined,
            IdentitySettingKind::AzureComWorkload => Self::AzureWorkload,
        }
    }
}

impl From<&rm::IdentitySettings> for IdentitySettings {
    fn from(identity: &rm::IdentitySettings) -> Self {
        Self {
            kind: identity.kind.into(),
            oidc_issuer: identity.oidc_issuer.clone(),
            resource: identity.resource.clone(),
        }
    }
}

impl From<IdentitySettings> for rm::IdentitySettings {
    fn from(identity: IdentitySettings) -> Self {
        Self {
            kind: identity.kind.into(),
            oidc_issuer: identity.oidc_issuer,
            resource: identity.resource,
        }
    }
}

#[must_use]
pub fn compute_to_wire(compute: &rm::EnvironmentCompute) -> EnvironmentComputeClassification {
    let identity = compute.identity.as_ref().map(IdentitySettings::from);
    match &compute.kind {
        rm::ComputeKind::Kubernetes { namespace } => KubernetesCompute {
            namespace: namespace.clone(),
            resource_id: compute.resource_id.clone(),
            identity,
        }
        .into(),
    }
}

/// # Errors
/// Returns `ConversionError::UnsupportedVariant` for compute kinds this version does not know.
pub fn compute_to_datamodel(
    field: &str,
    compute: EnvironmentComputeClassification,
) -> Result<rm::EnvironmentCompute, ConversionError> {
    match compute {
        EnvironmentComputeClassification::Kubernetes(k) => Ok(rm::EnvironmentCompute {
            kind: rm::ComputeKind::Kubernetes {
                namespace: k.namespace,
            },
            resource_id: k.resource_id,
            identity: k.identity.map(Into::into),
        }),
        other @ EnvironmentComputeClassification::Base(_) => {
            Err(ConversionError::unsupported_variant(field, &other))
        }
    }
}

/// Outbound status; `None` when there is nothing to report.
#[must_use]
pub fn status_to_wire(status: &rm::ResourceStatus) -> Option<ResourceStatus> {
    if status.is_empty() {
        return None;
    }
    Some(ResourceStatus {
        compute: status.compute.as_ref().map(compute_to_wire),
        output_resources: status
            .output_resources
            .iter()
            .map(|o| OutputResource {
                id: Some(o.id.clone()),
                local_id: Some(o.local_id.clone()),
                radius_managed: Some(o.radius_managed),
            })
            .collect(),
        recipe: status.recipe.as_ref().map(|r| RecipeStatus {
            template_kind: r.template_kind.clone(),
            template_path: r.template_path.clone(),
            template_version: r.template_version.clone(),
        }),
    })
}

#[must_use]
pub fn references_to_wire(refs: &[rm::ResourceReference]) -> Vec<ResourceReference> {
    refs.iter()
        .map(|r| ResourceReference { id: r.id.clone() })
        .collect()
}

#[must_use]
pub fn references_to_datamodel(refs: Vec<ResourceReference>) -> Vec<rm::ResourceReference> {
    refs.into_iter()
        .map(|r| rm::ResourceReference { id: r.id })
        .collect()
}

/// Check `value` is a resource id.
///
/// # Errors
/// Returns `ConversionError::Validation` naming `field`.
pub fn require_resource_id(field: &str, value: &str) -> Result<(), ConversionError> {
    if value.is_empty() {
        return Err(ConversionError::validation(field, "is required"));
    }
    ResourceId::parse(value)
        .map(|_| ())
        .map_err(|e| ConversionError::validation(field, e.to_string()))
}

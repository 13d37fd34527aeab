use std::collections::BTreeMap;

use armkit::api::ProvisioningState;
use armkit_polymorphic::discriminated_union;
use serde::{Deserialize, Serialize};

use super::common::{ResourceEnvelope, ResourceStatus};
use crate::datamodel::volume::{
    CertificateObjectProperties, KeyObjectProperties, SecretObjectProperties,
};

/// `Applications.Core/volumes` as sent and received in this version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResource {
    #[serde(flatten)]
    pub envelope: ResourceEnvelope,
    pub properties: VolumePropertiesClassification,
}

/// Properties every volume kind carries; also what unknown kinds decode into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureKeyVaultVolumeProperties {
    #[serde(default)]
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Id of the Key Vault.
    #[serde(default)]
    pub resource: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub certificates: BTreeMap<String, CertificateObjectProperties>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, KeyObjectProperties>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secrets: BTreeMap<String, SecretObjectProperties>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

discriminated_union! {
    pub enum VolumePropertiesClassification {
        field = "kind",
        base = Base(VolumeProperties) by kind,
        "azure.com.keyvault" => AzureKeyVault(AzureKeyVaultVolumeProperties),
    }
}

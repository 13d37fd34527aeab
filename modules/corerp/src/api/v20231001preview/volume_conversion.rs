use armkit::conv::{ConversionError, VersionedModel};
use armkit_resource_id::ResourceId;
use armkit_resourcemodel::{BasicResourceProperties, ResourceStatus};

use super::API_VERSION;
use super::common::{ResourceEnvelope, require_resource_id, status_to_wire};
use super::volume::{AzureKeyVaultVolumeProperties, VolumePropertiesClassification, VolumeResource};
use crate::datamodel::VolumeResource as StoredVolume;
use crate::datamodel::volume::{
    AzureKeyVaultVolumeProperties as StoredKeyVault, VolumeKind, VolumeProperties,
};

impl VersionedModel<StoredVolume> for VolumeResource {
    const API_VERSION: &'static str = API_VERSION;

    fn from_datamodel(model: &StoredVolume) -> Self {
        let basic = &model.properties.basic;
        let properties = match &model.properties.kind {
            VolumeKind::AzureKeyVault(kv) => AzureKeyVaultVolumeProperties {
                application: basic.application.clone(),
                environment: (!basic.environment.is_empty()).then(|| basic.environment.clone()),
                resource: kv.resource.clone(),
                certificates: kv.certificates.clone(),
                keys: kv.keys.clone(),
                secrets: kv.secrets.clone(),
                provisioning_state: Some(model.base.provisioning_state()),
                status: status_to_wire(&basic.status),
            }
            .into(),
        };
        Self {
            envelope: ResourceEnvelope::from_base(&model.base),
            properties,
        }
    }

    fn to_datamodel(self, id: &ResourceId) -> Result<StoredVolume, ConversionError> {
        let kv = match self.properties {
            VolumePropertiesClassification::AzureKeyVault(kv) => kv,
            other @ VolumePropertiesClassification::Base(_) => {
                return Err(ConversionError::unsupported_variant("properties", &other));
            }
        };
        require_resource_id("properties.application", &kv.application)?;
        require_resource_id("properties.resource", &kv.resource)?;
        if kv.certificates.is_empty() && kv.keys.is_empty() && kv.secrets.is_empty() {
            return Err(ConversionError::validation(
                "properties",
                "at least one of certificates, keys or secrets is required",
            ));
        }

        Ok(StoredVolume {
            base: self.envelope.into_base(id),
            properties: VolumeProperties {
                basic: BasicResourceProperties {
                    application: kv.application,
                    environment: kv.environment.unwrap_or_default(),
                    status: ResourceStatus::default(),
                },
                kind: VolumeKind::AzureKeyVault(StoredKeyVault {
                    resource: kv.resource,
                    certificates: kv.certificates,
                    keys: kv.keys,
                    secrets: kv.secrets,
                }),
            },
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use armkit_polymorphic::Polymorphic;
    use serde_json::json;

    fn volume_id() -> ResourceId {
        ResourceId::parse(
            "/planes/radius/local/resourceGroups/rg/providers/Applications.Core/volumes/certs",
        )
        .unwrap()
    }

    const APP: &str =
        "/planes/radius/local/resourceGroups/rg/providers/Applications.Core/applications/shop";
    const VAULT: &str =
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.KeyVault/vaults/kv";

    fn body(kind: &str) -> serde_json::Value {
        json!({
            "properties": {
                "kind": kind,
                "application": APP,
                "resource": VAULT,
                "secrets": { "db": { "name": "db-password" } }
            }
        })
    }

    #[test]
    fn key_vault_volume_round_trips() {
        let wire: VolumeResource = serde_json::from_value(body("azure.com.keyvault")).unwrap();
        let stored = wire.to_datamodel(&volume_id()).unwrap();
        let VolumeKind::AzureKeyVault(kv) = &stored.properties.kind;
        assert_eq!(kv.secrets["db"].name, "db-password");

        let out = serde_json::to_value(VolumeResource::from_datamodel(&stored)).unwrap();
        assert_eq!(out["properties"]["kind"], "azure.com.keyvault");
        assert_eq!(out["properties"]["provisioningState"], "Accepted");
        assert_eq!(out["name"], "certs");
    }

    #[test]
    fn unknown_volume_kind_is_rejected() {
        let wire: VolumeResource = serde_json::from_value(body("aws.secrets")).unwrap();
        assert!(wire.properties.is_base());
        let err = wire.to_datamodel(&volume_id()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedVariant { ref kind, .. } if kind == "aws.secrets"
        ));
    }

    #[test]
    fn empty_key_vault_volume_is_rejected() {
        let mut raw = body("azure.com.keyvault");
        raw["properties"]["secrets"] = json!({});
        let wire: VolumeResource = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            wire.to_datamodel(&volume_id()).unwrap_err(),
            ConversionError::Validation { .. }
        ));
    }
}

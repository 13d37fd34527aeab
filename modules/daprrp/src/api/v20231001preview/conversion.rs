use armkit::api::BaseResource;
use armkit::conv::{ConversionError, VersionedModel};
use armkit_resource_id::ResourceId;
use armkit_resourcemodel::{BasicResourceProperties, ResourceStatus};
use corerp::api::v20231001preview::common::{
    ResourceEnvelope, references_to_datamodel, references_to_wire,
    require_resource_id, status_to_wire,
};

use super::API_VERSION;
use super::models::{
    DaprConfigurationStoreResource, DaprPubSubBrokerResource, DaprResourceProperties,
    DaprSecretStoreResource, DaprStateStoreResource, Recipe,
};
use crate::datamodel::{
    DEFAULT_RECIPE_NAME, DaprComponentProperties, DaprConfigurationStore, DaprPubSubBroker,
    DaprSecretStore, DaprStateStore, ResourceProvisioning, ResourceRecipe,
};

macro_rules! component_projection {
    ($wire:ty => $stored:ident) => {
        impl VersionedModel<$stored> for $wire {
            const API_VERSION: &'static str = API_VERSION;

            fn from_datamodel(model: &$stored) -> Self {
                Self {
                    envelope: ResourceEnvelope::from_base(&model.base),
                    properties: properties_to_wire(&model.base, &model.properties),
                }
            }

            fn to_datamodel(self, id: &ResourceId) -> Result<$stored, ConversionError> {
                Ok($stored {
                    properties: properties_to_datamodel(self.properties)?,
                    base: self.envelope.into_base(id),
                })
            }
        }
    };
}

component_projection!(DaprStateStoreResource => DaprStateStore);
component_projection!(DaprPubSubBrokerResource => DaprPubSubBroker);
component_projection!(DaprConfigurationStoreResource => DaprConfigurationStore);

impl VersionedModel<DaprSecretStore> for DaprSecretStoreResource {
    const API_VERSION: &'static str = API_VERSION;

    fn from_datamodel(model: &DaprSecretStore) -> Self {
        Self {
            envelope: ResourceEnvelope::from_base(&model.base),
            properties: properties_to_wire(&model.base, &model.properties).into(),
        }
    }

    fn to_datamodel(self, id: &ResourceId) -> Result<DaprSecretStore, ConversionError> {
        Ok(DaprSecretStore {
            properties: properties_to_datamodel(self.properties.into())?,
            base: self.envelope.into_base(id),
        })
    }
}

fn properties_to_wire(base: &BaseResource, p: &DaprComponentProperties) -> DaprResourceProperties {
    DaprResourceProperties {
        environment: p.basic.environment.clone(),
        application: (!p.basic.application.is_empty()).then(|| p.basic.application.clone()),
        auth: p.auth.clone(),
        metadata: p.metadata.clone(),
        recipe: p.recipe.as_ref().map(|r| Recipe {
            name: Some(r.name.clone()),
            parameters: r.parameters.clone(),
        }),
        resource_provisioning: Some(p.resource_provisioning),
        resources: references_to_wire(&p.resources),
        component_type: p.component_type.clone(),
        version: p.version.clone(),
        component_name: (!p.component_name.is_empty()).then(|| p.component_name.clone()),
        provisioning_state: Some(base.provisioning_state()),
        status: status_to_wire(&p.basic.status),
    }
}

fn properties_to_datamodel(
    p: DaprResourceProperties,
) -> Result<DaprComponentProperties, ConversionError> {
    require_resource_id("properties.environment", &p.environment)?;
    if let Some(app) = &p.application {
        require_resource_id("properties.application", app)?;
    }
    for (name, entry) in &p.metadata {
        if entry.value.is_some() == entry.secret_key_ref.is_some() {
            return Err(ConversionError::validation(
                format!("properties.metadata['{name}']"),
                "exactly one of value and secretKeyRef must be set",
            ));
        }
    }

    let mode = p.resource_provisioning.unwrap_or_default();
    let recipe = match mode {
        ResourceProvisioning::Manual => {
            if p.recipe.is_some() {
                return Err(ConversionError::validation(
                    "properties.recipe",
                    "cannot be specified when resourceProvisioning is manual",
                ));
            }
            if p.metadata.is_empty() || p.component_type.is_none() || p.version.is_none() {
                return Err(ConversionError::validation(
                    "properties",
                    "metadata, type and version are required when resourceProvisioning is manual",
                ));
            }
            None
        }
        ResourceProvisioning::Recipe => {
            if !p.metadata.is_empty() || p.component_type.is_some() || p.version.is_some() {
                return Err(ConversionError::validation(
                    "properties",
                    "metadata, type and version cannot be specified when resourceProvisioning is recipe",
                ));
            }
            let recipe = p.recipe.unwrap_or_default();
            Some(ResourceRecipe {
                name: recipe
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| DEFAULT_RECIPE_NAME.to_owned()),
                parameters: recipe.parameters,
            })
        }
    };

    Ok(DaprComponentProperties {
        basic: BasicResourceProperties {
            application: p.application.unwrap_or_default(),
            environment: p.environment,
            status: ResourceStatus::default(),
        },
        resource_provisioning: mode,
        recipe,
        metadata: p.metadata,
        component_type: p.component_type,
        version: p.version,
        auth: p.auth,
        resources: references_to_datamodel(p.resources),
        component_name: String::new(),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use armkit::api::ProvisioningState;
    use serde_json::json;

    const RG: &str = "/planes/radius/local/resourceGroups/rg";
    const ENV: &str =
        "/planes/radius/local/resourceGroups/rg/providers/Applications.Core/environments/dev";

    fn id(resource_type: &str) -> ResourceId {
        ResourceId::parse(&format!("{RG}/providers/Applications.Dapr/{resource_type}/store"))
            .unwrap()
    }

    #[test]
    fn recipe_mode_defaults_the_recipe_name() {
        let wire: DaprStateStoreResource =
            serde_json::from_value(json!({ "properties": { "environment": ENV } })).unwrap();
        let stored = wire.to_datamodel(&id("stateStores")).unwrap();
        assert_eq!(
            stored.properties.resource_provisioning,
            ResourceProvisioning::Recipe
        );
        assert_eq!(stored.properties.recipe.unwrap().name, DEFAULT_RECIPE_NAME);
    }

    #[test]
    fn manual_mode_keeps_metadata_and_auth() {
        let wire: DaprPubSubBrokerResource = serde_json::from_value(json!({
            "properties": {
                "environment": ENV,
                "resourceProvisioning": "manual",
                "type": "pubsub.kafka",
                "version": "v1",
                "metadata": {
                    "brokers": { "value": "kafka:9092" },
                    "password": { "secretKeyRef": { "name": "kafka", "key": "password" } }
                },
                "auth": { "secretStore": "vault" },
                "componentName": "forged"
            }
        }))
        .unwrap();
        let stored = wire.to_datamodel(&id("pubSubBrokers")).unwrap();
        let p = &stored.properties;
        assert_eq!(p.component_type.as_deref(), Some("pubsub.kafka"));
        assert_eq!(
            p.metadata["password"].secret_key_ref.as_ref().unwrap().key,
            "password"
        );
        assert_eq!(p.auth.as_ref().unwrap().secret_store, "vault");
        assert!(p.recipe.is_none());
        assert!(p.component_name.is_empty(), "component name is read-only");
    }

    #[test]
    fn manual_mode_requires_component_details() {
        let wire: DaprStateStoreResource = serde_json::from_value(json!({
            "properties": {
                "environment": ENV,
                "resourceProvisioning": "manual",
                "type": "state.redis"
            }
        }))
        .unwrap();
        assert!(matches!(
            wire.to_datamodel(&id("stateStores")).unwrap_err(),
            ConversionError::Validation { .. }
        ));
    }

    #[test]
    fn recipe_mode_rejects_component_details() {
        let wire: DaprConfigurationStoreResource = serde_json::from_value(json!({
            "properties": { "environment": ENV, "type": "configuration.redis" }
        }))
        .unwrap();
        assert!(wire.to_datamodel(&id("configurationStores")).is_err());
    }

    #[test]
    fn metadata_entry_needs_exactly_one_source() {
        let wire: DaprStateStoreResource = serde_json::from_value(json!({
            "properties": {
                "environment": ENV,
                "resourceProvisioning": "manual",
                "type": "state.redis",
                "version": "v1",
                "metadata": { "host": {} }
            }
        }))
        .unwrap();
        let err = wire.to_datamodel(&id("stateStores")).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Validation { ref field, .. }
                if field == "properties.metadata['host']"
        ));
    }

    #[test]
    fn secret_store_never_emits_auth_or_resources() {
        let wire: DaprSecretStoreResource = serde_json::from_value(json!({
            "properties": {
                "environment": ENV,
                "resourceProvisioning": "manual",
                "type": "secretstores.kubernetes",
                "version": "v1",
                "metadata": { "vaultName": { "value": "kv" } },
                "auth": { "secretStore": "ignored" }
            }
        }))
        .unwrap();
        let mut stored = wire.to_datamodel(&id("secretStores")).unwrap();
        assert!(stored.properties.auth.is_none());
        stored.base.internal.async_provisioning_state = ProvisioningState::Succeeded;
        stored.properties.component_name = "store".to_owned();

        let out = serde_json::to_value(DaprSecretStoreResource::from_datamodel(&stored)).unwrap();
        assert!(out["properties"].get("auth").is_none());
        assert!(out["properties"].get("resources").is_none());
        assert_eq!(out["properties"]["componentName"], "store");
        assert_eq!(out["properties"]["provisioningState"], "Succeeded");
        assert_eq!(out["properties"]["resourceProvisioning"], "manual");
    }
}

//! Type-safe projection registry.
//!
//! - Key = (lowercased resource type, lowercased api version).
//! - Value = `Projection<T>` stored as `Box<dyn Any + Send + Sync>` (downcast on read).
//! - Lookups never fall back to another version.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::marker::PhantomData;

use armkit_resource_id::ResourceId;
use serde_json::Value;

use super::{ConversionError, DataModel, VersionedModel};

type Boxed = Box<dyn Any + Send + Sync>;

struct Projection<T> {
    to_wire: fn(&T) -> Result<Value, ConversionError>,
    from_wire: fn(&Value, &ResourceId) -> Result<T, ConversionError>,
    _model: PhantomData<fn() -> T>,
}

fn to_wire_via<T: DataModel, V: VersionedModel<T>>(model: &T) -> Result<Value, ConversionError> {
    Ok(serde_json::to_value(V::from_datamodel(model))?)
}

fn from_wire_via<T: DataModel, V: VersionedModel<T>>(
    body: &Value,
    id: &ResourceId,
) -> Result<T, ConversionError> {
    let versioned = V::deserialize(body).map_err(|e| ConversionError::InvalidBody(e.to_string()))?;
    versioned.to_datamodel(id)
}

fn key(resource_type: &str, api_version: &str) -> (String, String) {
    (
        resource_type.to_ascii_lowercase(),
        api_version.to_ascii_lowercase(),
    )
}

#[derive(Default)]
pub struct ConverterRegistry {
    map: HashMap<(String, String), Boxed>,
}

impl ConverterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the projection `V` of model `T`. Re-registering the same pair replaces it.
    #[must_use]
    pub fn with<T: DataModel, V: VersionedModel<T>>(mut self) -> Self {
        self.register::<T, V>();
        self
    }

    pub fn register<T: DataModel, V: VersionedModel<T>>(&mut self) {
        let projection = Projection::<T> {
            to_wire: to_wire_via::<T, V>,
            from_wire: from_wire_via::<T, V>,
            _model: PhantomData,
        };
        if self
            .map
            .insert(key(T::RESOURCE_TYPE, V::API_VERSION), Box::new(projection))
            .is_some()
        {
            tracing::warn!(
                resource_type = T::RESOURCE_TYPE,
                api_version = V::API_VERSION,
                "projection re-registered"
            );
        }
    }

    #[must_use]
    pub fn supports(&self, resource_type: &str, api_version: &str) -> bool {
        self.map.contains_key(&key(resource_type, api_version))
    }

    /// Registered api versions of `resource_type`, sorted.
    #[must_use]
    pub fn api_versions(&self, resource_type: &str) -> Vec<String> {
        let wanted = resource_type.to_ascii_lowercase();
        let mut versions: Vec<String> = self
            .map
            .keys()
            .filter(|(t, _)| *t == wanted)
            .map(|(_, v)| v.clone())
            .collect();
        versions.sort();
        versions
    }

    fn projection<T: DataModel>(
        &self,
        api_version: &str,
    ) -> Result<&Projection<T>, ConversionError> {
        let boxed = self
            .map
            .get(&key(T::RESOURCE_TYPE, api_version))
            .ok_or_else(|| ConversionError::UnsupportedApiVersion {
                resource_type: T::RESOURCE_TYPE.to_owned(),
                api_version: api_version.to_owned(),
            })?;
        boxed
            .downcast_ref::<Projection<T>>()
            .ok_or_else(|| ConversionError::ModelMismatch {
                resource_type: T::RESOURCE_TYPE.to_owned(),
                expected: type_name::<T>(),
            })
    }

    /// Project a stored model into the wire shape of `api_version`.
    ///
    /// # Errors
    /// Returns `ConversionError::UnsupportedApiVersion` when no projection is registered,
    /// or the serializer error of the versioned model.
    pub fn to_wire<T: DataModel>(
        &self,
        model: &T,
        api_version: &str,
    ) -> Result<Value, ConversionError> {
        (self.projection::<T>(api_version)?.to_wire)(model)
    }

    /// Project a request body of `api_version` into the stored model.
    ///
    /// # Errors
    /// Returns `ConversionError::UnsupportedApiVersion` when no projection is registered,
    /// `ConversionError::InvalidBody` when the body does not fit the wire model, and the
    /// projection's own validation errors.
    pub fn from_wire<T: DataModel>(
        &self,
        body: &Value,
        id: &ResourceId,
        api_version: &str,
    ) -> Result<T, ConversionError> {
        (self.projection::<T>(api_version)?.from_wire)(body, id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        size: u32,
        state: String,
    }

    impl DataModel for Widget {
        const RESOURCE_TYPE: &'static str = "Applications.Test/widgets";
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct WidgetV1 {
        id: Option<String>,
        size: u32,
        #[serde(rename = "provisioningState")]
        provisioning_state: Option<String>,
    }

    impl VersionedModel<Widget> for WidgetV1 {
        const API_VERSION: &'static str = "2024-01-01";

        fn from_datamodel(model: &Widget) -> Self {
            Self {
                id: Some(model.id.clone()),
                size: model.size,
                provisioning_state: Some(model.state.clone()),
            }
        }

        fn to_datamodel(self, id: &ResourceId) -> Result<Widget, ConversionError> {
            if self.size == 0 {
                return Err(ConversionError::validation("properties.size", "must be positive"));
            }
            Ok(Widget {
                id: id.to_string(),
                size: self.size,
                state: "Accepted".to_owned(),
            })
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Other {
        id: String,
    }

    impl DataModel for Other {
        const RESOURCE_TYPE: &'static str = "applications.test/WIDGETS";
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct OtherV1 {
        id: String,
    }

    impl VersionedModel<Other> for OtherV1 {
        const API_VERSION: &'static str = "2024-01-01";

        fn from_datamodel(model: &Other) -> Self {
            Self {
                id: model.id.clone(),
            }
        }

        fn to_datamodel(self, _id: &ResourceId) -> Result<Other, ConversionError> {
            Ok(Other { id: self.id })
        }
    }

    fn widget_id() -> ResourceId {
        ResourceId::parse(
            "/planes/radius/local/resourceGroups/rg/providers/Applications.Test/widgets/w",
        )
        .unwrap()
    }

    #[test]
    fn to_wire_uses_registered_version() {
        let registry = ConverterRegistry::new().with::<Widget, WidgetV1>();
        let model = Widget {
            id: "x".to_owned(),
            size: 2,
            state: "Succeeded".to_owned(),
        };
        let wire = registry.to_wire(&model, "2024-01-01").unwrap();
        assert_eq!(wire["provisioningState"], "Succeeded");
        assert!(registry.supports("applications.test/widgets", "2024-01-01"));
        assert_eq!(
            registry.api_versions("Applications.Test/widgets"),
            vec!["2024-01-01"]
        );
    }

    #[test]
    fn unknown_version_never_falls_back() {
        let registry = ConverterRegistry::new().with::<Widget, WidgetV1>();
        let model = Widget {
            id: "x".to_owned(),
            size: 2,
            state: "Succeeded".to_owned(),
        };
        let err = registry.to_wire(&model, "2024-01-02").unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedApiVersion { .. }));
        assert!(err.is_client_error());
        assert!(!registry.supports("Applications.Test/widgets", "2023-01-01"));
    }

    #[test]
    fn from_wire_ignores_read_only_fields() {
        let registry = ConverterRegistry::new().with::<Widget, WidgetV1>();
        let body = serde_json::json!({
            "id": "/forged",
            "size": 3,
            "provisioningState": "Succeeded"
        });
        let model: Widget = registry
            .from_wire(&body, &widget_id(), "2024-01-01")
            .unwrap();
        assert_eq!(model.id, widget_id().to_string());
        assert_eq!(model.state, "Accepted");
    }

    #[test]
    fn from_wire_reports_body_and_validation_errors() {
        let registry = ConverterRegistry::new().with::<Widget, WidgetV1>();
        let body = serde_json::json!({ "size": "big" });
        let err = registry
            .from_wire::<Widget>(&body, &widget_id(), "2024-01-01")
            .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidBody(_)));

        let body = serde_json::json!({ "size": 0 });
        let err = registry
            .from_wire::<Widget>(&body, &widget_id(), "2024-01-01")
            .unwrap_err();
        assert!(matches!(err, ConversionError::Validation { .. }));
    }

    #[test]
    fn model_mismatch_is_detected() {
        // Same (type, version) key registered for another model.
        let registry = ConverterRegistry::new().with::<Other, OtherV1>();
        let model = Widget {
            id: "x".to_owned(),
            size: 1,
            state: String::new(),
        };
        let err = registry.to_wire(&model, "2024-01-01").unwrap_err();
        assert!(matches!(err, ConversionError::ModelMismatch { .. }));
        assert!(!err.is_client_error());
    }
}

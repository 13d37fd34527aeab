use armkit_resource_id::ResourceId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Store bookkeeping for a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub id: String,
    pub etag: Option<String>,
}

/// An opaque stored item. The payload stays untyped until a caller materializes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub metadata: Metadata,
    pub data: serde_json::Value,
}

impl Object {
    #[must_use]
    pub fn new(id: &ResourceId, data: serde_json::Value) -> Self {
        Self {
            metadata: Metadata {
                id: id.to_string(),
                etag: None,
            },
            data,
        }
    }

    /// Build an object from any serializable resource.
    ///
    /// # Errors
    /// Returns the serializer error if the resource cannot be represented as JSON.
    pub fn from_resource<T: Serialize>(
        id: &ResourceId,
        resource: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, serde_json::to_value(resource)?))
    }

    /// Materialize the payload into a strongly-shaped resource.
    ///
    /// # Errors
    /// Returns the deserializer error if the payload does not fit `T`.
    pub fn as_resource<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

/// One page of a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectQueryResult {
    pub items: Vec<Object>,
    /// Present iff more pages exist.
    pub pagination_token: Option<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Thing {
        name: String,
        size: u32,
    }

    #[test]
    fn as_resource_materializes_payload() {
        let id = ResourceId::parse(
            "/planes/radius/local/resourceGroups/rg/providers/Applications.Test/things/a",
        )
        .unwrap();
        let obj = Object::from_resource(
            &id,
            &Thing {
                name: "a".to_owned(),
                size: 3,
            },
        )
        .unwrap();
        let thing: Thing = obj.as_resource().unwrap();
        assert_eq!(thing.size, 3);
        assert_eq!(obj.metadata.id, id.as_str());
    }

    #[test]
    fn as_resource_reports_shape_mismatch() {
        let id = ResourceId::parse(
            "/planes/radius/local/resourceGroups/rg/providers/Applications.Test/things/a",
        )
        .unwrap();
        let obj = Object::new(&id, serde_json::json!({ "name": 7 }));
        assert!(obj.as_resource::<Thing>().is_err());
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for armkit integration tests

use std::sync::Arc;

use armkit::conv::{ConversionError, ConverterRegistry, DataModel, VersionedModel};
use armkit_database::{DatabaseClient, InMemoryDatabaseClient, Object};
use armkit_resource_id::ResourceId;
use serde::{Deserialize, Serialize};

pub const WIDGET_TYPE: &str = "Applications.Test/widgets";
pub const V1: &str = "2024-01-01";
pub const RG1: &str = "/planes/radius/local/resourceGroups/rg1";
pub const RG2: &str = "/planes/radius/local/resourceGroups/rg2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub name: String,
    pub size: u32,
}

impl DataModel for Widget {
    const RESOURCE_TYPE: &'static str = WIDGET_TYPE;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WidgetResource {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub properties: WidgetProperties,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WidgetProperties {
    pub size: u32,
}

impl VersionedModel<Widget> for WidgetResource {
    const API_VERSION: &'static str = V1;

    fn from_datamodel(model: &Widget) -> Self {
        Self {
            id: Some(model.id.clone()),
            name: Some(model.name.clone()),
            resource_type: Some(WIDGET_TYPE.to_owned()),
            properties: WidgetProperties { size: model.size },
        }
    }

    fn to_datamodel(self, id: &ResourceId) -> Result<Widget, ConversionError> {
        Ok(Widget {
            id: id.to_string(),
            name: id.name().unwrap_or_default(),
            size: self.properties.size,
        })
    }
}

pub fn converters() -> Arc<ConverterRegistry> {
    Arc::new(ConverterRegistry::new().with::<Widget, WidgetResource>())
}

pub fn widget_id(scope: &str, name: &str) -> ResourceId {
    ResourceId::parse(&format!("{scope}/providers/{WIDGET_TYPE}/{name}")).unwrap()
}

pub fn collection(scope: &str) -> ResourceId {
    ResourceId::parse(&format!("{scope}/providers/{WIDGET_TYPE}")).unwrap()
}

pub fn widget_object(scope: &str, name: &str) -> Object {
    let id = widget_id(scope, name);
    let widget = Widget {
        id: id.to_string(),
        name: name.to_owned(),
        size: 1,
    };
    Object::from_resource(&id, &widget).unwrap()
}

/// In-memory store with `count` widgets in `scope`, named `w000`, `w001`, ...
pub async fn seeded_store(scope: &str, count: usize) -> Arc<InMemoryDatabaseClient> {
    let store = Arc::new(InMemoryDatabaseClient::new());
    seed(&store, scope, count).await;
    store
}

pub async fn seed(store: &InMemoryDatabaseClient, scope: &str, count: usize) {
    for i in 0..count {
        store
            .save(widget_object(scope, &format!("w{i:03}")))
            .await
            .unwrap();
    }
}

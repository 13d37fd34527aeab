//! Status document of the Kubernetes `Resource` custom resource.
//!
//! The document is owned by the cluster; this crate only reads and writes the
//! computed values and the output resource map. Computed and secret values stay
//! opaque JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::graph::OutputResourceGraph;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

/// Provisioning and health of one output resource. Not part of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResourceStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provisioning_state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provisioning_state_error_details: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub health_state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub health_state_error_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputResourceEntry {
    #[serde(default)]
    pub resource: ObjectReference,
    #[serde(default)]
    pub status: OutputResourceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    pub last_transition_time: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatusDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_values: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_values: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, OutputResourceEntry>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub observed_generation: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phrase: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl ResourceStatusDocument {
    /// Read computed values as `T`. `None` when nothing was computed yet.
    ///
    /// # Errors
    /// Returns the deserializer error when the stored values do not fit `T`.
    pub fn computed_values<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.computed_values
            .as_ref()
            .map(T::deserialize)
            .transpose()
    }

    /// # Errors
    /// Returns the serializer error of `values`.
    pub fn set_computed_values<T: Serialize>(
        &mut self,
        values: &T,
    ) -> Result<(), serde_json::Error> {
        self.computed_values = Some(serde_json::to_value(values)?);
        Ok(())
    }

    #[must_use]
    pub fn output_resources(&self) -> &BTreeMap<String, OutputResourceEntry> {
        &self.resources
    }

    pub fn set_output_resource(&mut self, local_id: impl Into<String>, entry: OutputResourceEntry) {
        self.resources.insert(local_id.into(), entry);
    }

    /// Make the resource map mirror `graph`: entries for unknown local ids are
    /// dropped, existing statuses are kept, new local ids start empty.
    pub fn sync_output_resources(
        &mut self,
        graph: &OutputResourceGraph,
        reference: impl Fn(&str, &str) -> ObjectReference,
    ) {
        let mut next = BTreeMap::new();
        for resource in graph.iter() {
            let status = self
                .resources
                .remove(&resource.local_id)
                .map(|e| e.status)
                .unwrap_or_default();
            next.insert(
                resource.local_id.clone(),
                OutputResourceEntry {
                    resource: reference(&resource.local_id, &resource.id),
                    status,
                },
            );
        }
        self.resources = next;
    }
}
